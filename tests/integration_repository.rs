use fake::Fake;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use sitekit_db::{Fields, OrderBy, RepoError, Repository};
use sitekit_models::{Email, Message, Post};
use sqlx::PgPool;

type Emails = Repository<Email>;

async fn seed_emails(pool: &PgPool, count: usize) -> Vec<Email> {
    let mut emails = Vec::with_capacity(count);
    for i in 0..count {
        let email = Emails::create(
            pool,
            &Fields::new()
                .set("email", format!("member{i}@example.com"))
                .set("is_active", i % 2 == 0),
        )
        .await
        .unwrap();
        emails.push(email);
    }
    emails
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_uses_column_defaults(pool: PgPool) {
    let email = Emails::create(&pool, &Fields::new().set("email", "a@example.com"))
        .await
        .unwrap();

    assert!(email.id > 0);
    assert!(!email.is_active);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_count_and_filter(pool: PgPool) {
    seed_emails(&pool, 5).await;

    assert_eq!(Emails::count(&pool, &Fields::new()).await.unwrap(), 5);
    assert_eq!(
        Emails::count(&pool, &Fields::new().set("is_active", true)).await.unwrap(),
        3
    );

    let inactive = Emails::get_all(&pool, &Fields::new().set("is_active", false), &[], None, 0)
        .await
        .unwrap();
    assert_eq!(inactive.len(), 2);
    assert!(inactive.iter().all(|email| !email.is_active));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_all_orders_and_pages(pool: PgPool) {
    seed_emails(&pool, 5).await;

    let page = Emails::get_all(&pool, &Fields::new(), &[OrderBy::desc("email")], Some(2), 1)
        .await
        .unwrap();
    let addresses: Vec<_> = page.iter().map(|email| email.email.as_str()).collect();
    assert_eq!(addresses, vec!["member3@example.com", "member2@example.com"]);

    let everything = Emails::get_all(&pool, &Fields::new(), &[], None, 0).await.unwrap();
    assert_eq!(everything.len(), 5);
    assert!(everything.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_by_params_and_id(pool: PgPool) {
    let seeded = seed_emails(&pool, 3).await;

    let found = Emails::get_by_params(&pool, &Fields::new().set("email", "member1@example.com"))
        .await
        .unwrap();
    assert_eq!(found.as_ref(), Some(&seeded[1]));

    assert_eq!(Emails::get_by_id(&pool, seeded[2].id).await.unwrap().as_ref(), Some(&seeded[2]));
    assert_eq!(Emails::get_by_id(&pool, -1).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_null_filter_matches_missing_values(pool: PgPool) {
    let fullname: String = Name().fake();
    let body: String = Sentence(3..8).fake();
    let without_company = Repository::<Message>::create(
        &pool,
        &Fields::new()
            .set("fullname", fullname.as_str())
            .set("email", "a@example.com")
            .set("title", "Hello")
            .set("body", body.as_str()),
    )
    .await
    .unwrap();
    Repository::<Message>::create(
        &pool,
        &Fields::new()
            .set("fullname", fullname.as_str())
            .set("company_name", "Acme")
            .set("email", "b@example.com")
            .set("title", "Hello")
            .set("body", body.as_str()),
    )
    .await
    .unwrap();

    let filter = Fields::new().set("company_name", None::<String>);
    let rows = Repository::<Message>::get_all(&pool, &filter, &[], None, 0)
        .await
        .unwrap();

    assert_eq!(rows, vec![without_company]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_columns_are_rejected(pool: PgPool) {
    let filter = Fields::new().set("nope", 1);
    assert!(matches!(
        Emails::count(&pool, &filter).await,
        Err(RepoError::UnknownColumn { .. })
    ));

    let result = Emails::get_all(&pool, &Fields::new(), &[OrderBy::asc("nope")], None, 0).await;
    assert!(matches!(result, Err(RepoError::UnknownColumn { .. })));

    let result = Emails::create(&pool, &Fields::new().set("email", "a@example.com").set("nope", 1)).await;
    assert!(matches!(result, Err(RepoError::UnknownColumn { .. })));
    assert_eq!(Emails::count(&pool, &Fields::new()).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unique_violation_names_constraint(pool: PgPool) {
    seed_emails(&pool, 1).await;

    let result = Emails::create(&pool, &Fields::new().set("email", "member0@example.com")).await;

    match result {
        Err(RepoError::UniqueViolation { constraint }) => assert_eq!(constraint, "emails_email_key"),
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_writes_known_columns_only(pool: PgPool) {
    let email = seed_emails(&pool, 1).await.remove(0);

    let updated = Emails::update(
        &pool,
        &email,
        &Fields::new()
            .set("email", "renamed@example.com")
            .set("id", 999)
            .set("unknown", "ignored"),
    )
    .await
    .unwrap();

    assert_eq!(updated.id, email.id);
    assert_eq!(updated.email, "renamed@example.com");

    let unchanged = Emails::update(&pool, &updated, &Fields::new().set("unknown", 1))
        .await
        .unwrap();
    assert_eq!(unchanged, updated);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_touches_timestamp(pool: PgPool) {
    let post = Repository::<Post>::create(
        &pool,
        &Fields::new().set("slug", "first").set("title", "First"),
    )
    .await
    .unwrap();
    assert!(post.updated_at.is_none());

    let updated = Repository::<Post>::update(&pool, &post, &Fields::new().set("title", "Edited"))
        .await
        .unwrap();

    assert_eq!(updated.title, "Edited");
    assert!(updated.updated_at.is_some());
    assert_eq!(updated.created_at, post.created_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_exists_can_exclude_a_row(pool: PgPool) {
    let email = seed_emails(&pool, 1).await.remove(0);
    let filter = Fields::new().set("email", email.email.as_str());

    assert!(Emails::exists(&pool, &filter, None).await.unwrap());
    assert!(!Emails::exists(&pool, &filter, Some(email.id)).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_returns_row_once(pool: PgPool) {
    let email = seed_emails(&pool, 1).await.remove(0);

    let deleted = Emails::delete(&pool, email.clone()).await.unwrap();
    assert_eq!(deleted, email);
    assert!(Emails::get_by_id(&pool, email.id).await.unwrap().is_none());

    assert!(matches!(
        Emails::delete(&pool, email).await,
        Err(RepoError::NotFound { .. })
    ));
}
