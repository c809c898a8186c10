mod common;

use storage::dto::comment::CreateCommentRequest;
use storage::dto::review::ReviewDecision;
use storage::error::StorageError;
use storage::models::{ReviewAction, SubmissionStatus};
use storage::repository::comment::CommentRepository;
use storage::repository::download::DownloadRepository;
use storage::services::{comments, review, submissions};

use common::{EXAMPLE_SOURCE, admin, setup, upload, user};

#[tokio::test]
async fn non_admin_review_leaves_submission_pending() {
    let db = setup().await;
    let alice = user(&db, "alice").await;
    let submission = upload(&db, &alice, "tiny", EXAMPLE_SOURCE).await;

    let err = review::review(db.pool(), &alice, submission.submission_id, ReviewDecision::Approved)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::PermissionDenied(_)));
    let detail = submissions::get_detail(db.pool(), submission.submission_id)
        .await
        .unwrap();
    assert_eq!(detail.status, SubmissionStatus::Pending);
}

#[tokio::test]
async fn approval_is_audited() {
    let db = setup().await;
    let admin = admin(&db).await;
    let alice = user(&db, "alice").await;
    let submission = upload(&db, &alice, "tiny", EXAMPLE_SOURCE).await;

    let reviewed = review::review(
        db.pool(),
        &admin,
        submission.submission_id,
        ReviewDecision::Approved,
    )
    .await
    .unwrap();

    assert_eq!(reviewed.status, SubmissionStatus::Approved);
    assert_eq!(reviewed.score, submission.score);

    let log = review::audit_log(db.pool(), &admin, Some(submission.submission_id))
        .await
        .unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].action, ReviewAction::Approved);
    assert_eq!(log[0].actor_id, admin.user_id);
    assert_eq!(log[0].actor_name, "admin");
    assert_eq!(log[0].submission_id, submission.submission_id);
}

#[tokio::test]
async fn reviewed_submission_can_be_reviewed_again() {
    let db = setup().await;
    let admin = admin(&db).await;
    let alice = user(&db, "alice").await;
    let id = upload(&db, &alice, "tiny", EXAMPLE_SOURCE).await.submission_id;

    review::review(db.pool(), &admin, id, ReviewDecision::Approved)
        .await
        .unwrap();
    let rejected = review::review(db.pool(), &admin, id, ReviewDecision::Rejected)
        .await
        .unwrap();
    assert_eq!(rejected.status, SubmissionStatus::Rejected);

    let approved = review::review(db.pool(), &admin, id, ReviewDecision::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, SubmissionStatus::Approved);

    let actions: Vec<ReviewAction> = review::audit_log(db.pool(), &admin, Some(id))
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    assert_eq!(
        actions,
        vec![
            ReviewAction::Approved,
            ReviewAction::Rejected,
            ReviewAction::Approved
        ]
    );
}

#[tokio::test]
async fn reviewing_unknown_submission_is_not_found() {
    let db = setup().await;
    let admin = admin(&db).await;

    let err = review::review(db.pool(), &admin, 404, ReviewDecision::Rejected)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound));
    assert!(review::audit_log(db.pool(), &admin, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_cascades_comments_and_downloads() {
    let db = setup().await;
    let admin = admin(&db).await;
    let alice = user(&db, "alice").await;
    let bob = user(&db, "bob").await;
    let id = upload(&db, &alice, "tiny", EXAMPLE_SOURCE).await.submission_id;

    for rating in [3, 4, 5] {
        comments::add_comment(
            db.pool(),
            &bob,
            id,
            &CreateCommentRequest {
                rating,
                content: format!("rated {}", rating),
            },
        )
        .await
        .unwrap();
    }
    submissions::download(db.pool(), Some(&bob), id).await.unwrap();
    submissions::download(db.pool(), None, id).await.unwrap();

    let detail = submissions::get_detail(db.pool(), id).await.unwrap();
    assert_eq!(detail.comment_count, 3);
    assert_eq!(detail.download_count, 2);
    assert_eq!(detail.average_rating, Some(4.0));

    review::delete_submission(db.pool(), &admin, id).await.unwrap();

    assert!(matches!(
        submissions::get_detail(db.pool(), id).await,
        Err(StorageError::NotFound)
    ));
    let mut conn = db.pool().acquire().await.unwrap();
    assert_eq!(
        CommentRepository::new(&mut conn)
            .count_for_submission(id)
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        DownloadRepository::new(&mut conn)
            .count_for_submission(id)
            .await
            .unwrap(),
        0
    );
    drop(conn);

    let log = review::audit_log(db.pool(), &admin, Some(id)).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].action, ReviewAction::Deleted);
}

#[tokio::test]
async fn non_admin_delete_keeps_submission() {
    let db = setup().await;
    let alice = user(&db, "alice").await;
    let id = upload(&db, &alice, "tiny", EXAMPLE_SOURCE).await.submission_id;

    let err = review::delete_submission(db.pool(), &alice, id)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::PermissionDenied(_)));
    assert!(submissions::get_detail(db.pool(), id).await.is_ok());
}

#[tokio::test]
async fn deleting_missing_submission_is_not_found() {
    let db = setup().await;
    let admin = admin(&db).await;

    assert!(matches!(
        review::delete_submission(db.pool(), &admin, 99).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn comment_on_deleted_submission_is_not_found() {
    let db = setup().await;
    let admin = admin(&db).await;
    let alice = user(&db, "alice").await;
    let id = upload(&db, &alice, "tiny", EXAMPLE_SOURCE).await.submission_id;
    review::delete_submission(db.pool(), &admin, id).await.unwrap();

    let err = comments::add_comment(
        db.pool(),
        &alice,
        id,
        &CreateCommentRequest {
            rating: 5,
            content: "too late".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, StorageError::NotFound), "{err:?}");
}

#[tokio::test]
async fn pending_queue_lists_only_unreviewed_submissions() {
    let db = setup().await;
    let admin = admin(&db).await;
    let alice = user(&db, "alice").await;
    let first = upload(&db, &alice, "first", EXAMPLE_SOURCE).await;
    let second = upload(&db, &alice, "second", EXAMPLE_SOURCE).await;
    review::review(db.pool(), &admin, first.submission_id, ReviewDecision::Approved)
        .await
        .unwrap();

    let pending = review::list_pending(db.pool(), &admin).await.unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].submission_id, second.submission_id);
    assert_eq!(pending[0].owner_name, "alice");
    assert!(matches!(
        review::list_pending(db.pool(), &alice).await,
        Err(StorageError::PermissionDenied(_))
    ));
}
