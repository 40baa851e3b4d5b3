//! Integration tests for the list lifecycle and its best-effort provider
//! sync: local list records stay authoritative when the provider fails.

mod common;

use std::sync::Arc;

use crate::common::TestHarness;
use server_core::domains::lists::activities::provider_sync;
use server_core::domains::lists::activities::{create_list, delete_list, update_list};
use server_core::domains::lists::models::list::List;
use server_core::kernel::{MockListProvider, ProviderCall};
use sqlx::PgPool;
use test_context::test_context;
use uuid::Uuid;

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

async fn create_user_row(email: &str, display_name: &str, pool: &PgPool) -> Uuid {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (email, display_name) VALUES ($1, $2) RETURNING id",
    )
    .bind(email)
    .bind(display_name)
    .fetch_one(pool)
    .await
    .expect("Failed to create user");
    id
}

async fn create_list_row(name: &str, external_address: Option<&str>, pool: &PgPool) -> List {
    sqlx::query_as::<_, List>(
        "INSERT INTO lists (name, description, active, external_address)
         VALUES ($1, $2, true, $3) RETURNING *",
    )
    .bind(name)
    .bind("Test list")
    .bind(external_address)
    .fetch_one(pool)
    .await
    .expect("Failed to create list")
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_list_mirrors_at_provider(ctx: &TestHarness) {
    let name = unique("announce");
    let address = format!("{}@mg.example.com", name);
    let provider = Arc::new(MockListProvider::new().with_list_address(&address));
    let deps = ctx.deps_with(provider.clone(), ctx.mailer.clone());

    let list = create_list(&name, "Announcements", &deps).await.unwrap();

    assert_eq!(list.external_address, Some(address));
    assert!(provider.calls().iter().any(|call| matches!(
        call,
        ProviderCall::CreateList { name: n, .. } if *n == name
    )));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_list_rejects_invalid_input(ctx: &TestHarness) {
    let deps = ctx.deps();

    assert!(create_list("Bad Name", "desc", &deps).await.is_err());
    assert!(create_list("bad!name", "desc", &deps).await.is_err());
    assert!(create_list(&unique("ok"), "   ", &deps).await.is_err());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_list_survives_provider_failure(ctx: &TestHarness) {
    let deps = ctx.deps();
    let name = unique("announce");

    ctx.provider.set_failing(true);
    let list = create_list(&name, "Announcements", &deps).await.unwrap();

    // The local record is authoritative; the mirror just never happened.
    assert_eq!(list.external_address, None);
    assert!(List::find_active_by_name(&name, &ctx.db_pool)
        .await
        .unwrap()
        .is_some());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn list_creation_imports_existing_members(ctx: &TestHarness) {
    let deps = ctx.deps();
    let list = create_list_row(&unique("team"), None, &ctx.db_pool).await;

    let bob = format!("{}@x.com", unique("bob"));
    let carol = format!("{}@x.com", unique("carol"));
    for email in [&bob, &carol] {
        let user_id = create_user_row(email, "Member", &ctx.db_pool).await;
        sqlx::query("INSERT INTO memberships (list_id, user_id) VALUES ($1, $2)")
            .bind(list.id)
            .bind(user_id)
            .execute(&ctx.db_pool)
            .await
            .expect("Failed to create membership");
    }

    provider_sync::on_list_created(&list, &deps).await.unwrap();

    let updated = List::find_by_id(list.id, &ctx.db_pool).await.unwrap();
    assert!(updated.external_address.is_some());
    assert_eq!(ctx.provider.member_adds(), vec![bob, carol]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_list_pushes_only_changed_fields(ctx: &TestHarness) {
    let deps = ctx.deps();
    let address = format!("{}@mg.example.com", unique("team"));
    let list = create_list_row(&unique("team"), Some(&address), &ctx.db_pool).await;

    update_list(list.id, &list.name, "New description", &deps)
        .await
        .unwrap();

    assert_eq!(
        ctx.provider.calls(),
        vec![ProviderCall::UpdateList {
            address,
            name: None,
            description: Some("New description".to_string()),
        }]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_list_without_changes_skips_provider(ctx: &TestHarness) {
    let deps = ctx.deps();
    let address = format!("{}@mg.example.com", unique("team"));
    let list = create_list_row(&unique("team"), Some(&address), &ctx.db_pool).await;

    update_list(list.id, &list.name, &list.description, &deps)
        .await
        .unwrap();

    assert!(ctx.provider.calls().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_unmirrored_list_skips_provider(ctx: &TestHarness) {
    let deps = ctx.deps();
    let list = create_list_row(&unique("team"), None, &ctx.db_pool).await;

    update_list(list.id, &list.name, "New description", &deps)
        .await
        .unwrap();

    assert!(ctx.provider.calls().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_list_is_best_effort_at_provider(ctx: &TestHarness) {
    let deps = ctx.deps();
    let address = format!("{}@mg.example.com", unique("team"));
    let list = create_list_row(&unique("team"), Some(&address), &ctx.db_pool).await;

    ctx.provider.set_failing(true);
    delete_list(list.id, &deps).await.unwrap();

    // Provider deletion was attempted, its failure did not block local delete.
    assert_eq!(
        ctx.provider.calls(),
        vec![ProviderCall::DeleteList { address }]
    );
    assert!(List::find_by_id(list.id, &ctx.db_pool).await.is_err());
}
