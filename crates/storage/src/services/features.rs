//! Structural feature extraction for submitted Python source.
//!
//! Only two features feed the score: how many `def` function definitions the
//! syntax tree contains, and how many `#` characters appear anywhere in the
//! raw text, including any `#` inside a string literal.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};
use utoipa::ToSchema;

const FUNCTION_DEFINITION: &str = "function_definition";
const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeatureVector {
    pub function_count: u64,
    pub comment_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("failed to load the Python grammar: {0}")]
    Grammar(String),

    #[error("parser produced no syntax tree")]
    NoTree,

    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

/// Extract the feature vector of `source`.
///
/// Returns [`ParseError::Syntax`] when the text is not a well-formed Python
/// module; the caller decides whether that is fatal.
pub fn extract(source: &str) -> Result<FeatureVector, ParseError> {
    let tree = parse_python(source)?;

    if tree.root_node().has_error() {
        let (line, column) = first_error_position(&tree);
        return Err(ParseError::Syntax { line, column });
    }

    if let Some(node) = first_python3_violation(&tree) {
        let (line, column) = position(node);
        return Err(ParseError::Syntax { line, column });
    }

    Ok(FeatureVector {
        function_count: count_function_definitions(&tree),
        comment_count: count_comment_markers(source),
    })
}

/// Count of `#` characters in the raw text.
pub fn count_comment_markers(source: &str) -> u64 {
    source.chars().filter(|c| *c == COMMENT_MARKER).count() as u64
}

fn parse_python(source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ParseError::Grammar(e.to_string()))?;

    parser.parse(source, None).ok_or(ParseError::NoTree)
}

fn count_function_definitions(tree: &Tree) -> u64 {
    let mut count = 0;
    visit_nodes(tree, |node| {
        if node.kind() == FUNCTION_DEFINITION && !is_async(node) {
            count += 1;
        }
    });
    count
}

// `async def` shares the function_definition node kind, with a leading
// `async` token.
fn is_async(node: Node<'_>) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

fn first_error_position(tree: &Tree) -> (usize, usize) {
    let mut found = None;
    visit_nodes(tree, |node| {
        if found.is_none() && (node.is_error() || node.is_missing()) {
            found = Some(position(node));
        }
    });
    found.unwrap_or((1, 1))
}

/// 1-based line and column of the node's first character
fn position(node: Node<'_>) -> (usize, usize) {
    let point = node.start_position();
    (point.row + 1, point.column + 1)
}

// The grammar also accepts Python 2 statements and a few forms that only
// the Python 3 compiler rejects. Those are checked here.
fn first_python3_violation<'t>(tree: &'t Tree) -> Option<Node<'t>> {
    let mut found = None;
    visit_nodes(tree, |node| {
        if found.is_some() {
            return;
        }
        found = match node.kind() {
            "print_statement" | "exec_statement" => Some(node),
            "parameters" | "lambda_parameters" => misplaced_default(node),
            "argument_list" => misordered_argument(node),
            "pattern_list" | "tuple_pattern" | "list_pattern" => repeated_starred_target(node),
            _ => None,
        };
    });
    found
}

/// Positional parameter after a defaulted one, before any `*`
fn misplaced_default(parameters: Node<'_>) -> Option<Node<'_>> {
    let mut seen_default = false;
    let mut keyword_only = false;
    let mut cursor = parameters.walk();

    for param in parameters.named_children(&mut cursor) {
        match param.kind() {
            "default_parameter" | "typed_default_parameter" => seen_default = true,
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => {
                keyword_only = true
            }
            "typed_parameter" if is_splat_typed(param) => keyword_only = true,
            "identifier" | "typed_parameter" | "tuple_pattern" => {
                if seen_default && !keyword_only {
                    return Some(param);
                }
            }
            _ => {}
        }
    }
    None
}

// `*args: T` and `**kwargs: T` are typed_parameter nodes wrapping the splat
fn is_splat_typed(param: Node<'_>) -> bool {
    param.named_child(0).is_some_and(|inner| {
        matches!(inner.kind(), "list_splat_pattern" | "dictionary_splat_pattern")
    })
}

/// Positional argument after a keyword argument or `**`, or `*` after `**`
fn misordered_argument(arguments: Node<'_>) -> Option<Node<'_>> {
    let mut seen_keyword = false;
    let mut seen_double_star = false;
    let mut cursor = arguments.walk();

    for arg in arguments.named_children(&mut cursor) {
        match arg.kind() {
            "comment" => {}
            "keyword_argument" => seen_keyword = true,
            "dictionary_splat" => {
                seen_keyword = true;
                seen_double_star = true;
            }
            "list_splat" | "parenthesized_list_splat" => {
                if seen_double_star {
                    return Some(arg);
                }
            }
            _ => {
                if seen_keyword {
                    return Some(arg);
                }
            }
        }
    }
    None
}

/// Second `*target` in one assignment target list
fn repeated_starred_target(targets: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = targets.walk();
    targets
        .named_children(&mut cursor)
        .filter(|target| target.kind() == "list_splat_pattern")
        .nth(1)
}

/// Pre-order traversal of every node in the tree.
fn visit_nodes<'t>(tree: &'t Tree, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = tree.walk();
    loop {
        visit(cursor.node());

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
