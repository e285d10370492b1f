//! Integration tests for the account lifecycle
//!
//! Every scenario drives the services through the in-memory bank adapter;
//! the quote feed is replaced by a deterministic fixture.
//!
//! Run with: cargo test --test account_lifecycle_tests -- --nocapture

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use ledgerline_core::adapters::{FixedRates, MemoryBank};
use ledgerline_core::config::Config;
use ledgerline_core::ports::{AccountStore, RateSource, TransferLog, UnitOfWork, UserStore};
use ledgerline_core::{
    Account, CancellationToken, Currency, Error, LedgerContext, NewAccount, NewUser, User,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Wire a context over a fresh in-memory bank and fixed quotes
fn test_context(rates: FixedRates) -> (Arc<MemoryBank>, LedgerContext) {
    let bank = Arc::new(MemoryBank::new());
    let ctx = LedgerContext::new(
        Arc::clone(&bank) as Arc<dyn UserStore>,
        Arc::clone(&bank) as Arc<dyn AccountStore>,
        Arc::clone(&bank) as Arc<dyn TransferLog>,
        Arc::new(rates) as Arc<dyn RateSource>,
        Arc::clone(&bank) as Arc<dyn UnitOfWork>,
        Config::default(),
    );
    (bank, ctx)
}

/// Seed a committed user directly through the store
async fn seed_user(bank: &MemoryBank, login: &str) -> User {
    let user = UserStore::create(
        bank,
        NewUser {
            login: login.to_string(),
            email: format!("{login}@example.com"),
        },
    )
    .await
    .unwrap();
    bank.commit().await.unwrap();
    user
}

/// Seed a committed open account directly through the store
async fn seed_account(
    bank: &MemoryBank,
    owner: &User,
    currency: Currency,
    amount: Decimal,
) -> Account {
    let account = AccountStore::create(bank, owner.id, currency, amount)
        .await
        .unwrap();
    bank.commit().await.unwrap();
    account
}

fn token() -> CancellationToken {
    CancellationToken::new()
}

// ============================================================================
// Account Creation
// ============================================================================

#[tokio::test]
async fn test_create_account_for_unknown_user_fails() {
    let (_bank, ctx) = test_context(FixedRates::new());

    let result = ctx
        .accounts
        .create_account(
            NewAccount {
                user_id: Uuid::new_v4(),
                currency: Currency::Rub,
                amount: Decimal::new(10000, 2),
            },
            &token(),
        )
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_create_account_rejects_non_positive_amount() {
    let (bank, ctx) = test_context(FixedRates::new());
    let user = seed_user(&bank, "ivan").await;

    for amount in [Decimal::ZERO, Decimal::new(-100, 2)] {
        let result = ctx
            .accounts
            .create_account(
                NewAccount {
                    user_id: user.id,
                    currency: Currency::Eur,
                    amount,
                },
                &token(),
            )
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}

#[tokio::test]
async fn test_create_account_commits_once_and_is_visible() {
    let (bank, ctx) = test_context(FixedRates::new());
    let user = seed_user(&bank, "ivan").await;
    let commits_before = bank.commits();

    let account = ctx
        .accounts
        .create_account(
            NewAccount {
                user_id: user.id,
                currency: Currency::Usd,
                amount: Decimal::new(50000, 2),
            },
            &token(),
        )
        .await
        .unwrap();

    assert_eq!(bank.commits(), commits_before + 1);
    assert!(account.is_open);
    assert!(account.close_date.is_none());

    let fetched = ctx.accounts.get_account(account.id, &token()).await.unwrap();
    assert_eq!(fetched, account);
}

#[tokio::test]
async fn test_create_account_with_cancelled_token_leaves_no_trace() {
    let (bank, ctx) = test_context(FixedRates::new());
    let user = seed_user(&bank, "ivan").await;
    let commits_before = bank.commits();

    let cancel = token();
    cancel.cancel();

    let result = ctx
        .accounts
        .create_account(
            NewAccount {
                user_id: user.id,
                currency: Currency::Rub,
                amount: Decimal::new(10000, 2),
            },
            &cancel,
        )
        .await;

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(bank.commits(), commits_before);
    assert_eq!(bank.staged_writes(), 0);
}

// ============================================================================
// Account Lookup
// ============================================================================

#[tokio::test]
async fn test_get_account_unknown_id_fails() {
    let (_bank, ctx) = test_context(FixedRates::new());
    let result = ctx.accounts.get_account(Uuid::new_v4(), &token()).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_list_user_accounts_requires_existing_user() {
    let (_bank, ctx) = test_context(FixedRates::new());
    let result = ctx
        .accounts
        .list_user_accounts(Uuid::new_v4(), &token())
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_list_user_accounts_filters_by_owner() {
    let (bank, ctx) = test_context(FixedRates::new());
    let ivan = seed_user(&bank, "ivan").await;
    let maria = seed_user(&bank, "maria").await;
    seed_account(&bank, &ivan, Currency::Rub, Decimal::new(100, 2)).await;
    seed_account(&bank, &ivan, Currency::Eur, Decimal::new(200, 2)).await;
    seed_account(&bank, &maria, Currency::Usd, Decimal::new(300, 2)).await;

    let accounts = ctx.accounts.list_user_accounts(ivan.id, &token()).await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert!(accounts.iter().all(|a| a.user_id == ivan.id));

    let all = ctx.accounts.list_accounts(&token()).await.unwrap();
    assert_eq!(all.len(), 3);
}

// ============================================================================
// Account Closing
// ============================================================================

#[tokio::test]
async fn test_close_unknown_account_fails() {
    let (_bank, ctx) = test_context(FixedRates::new());
    let result = ctx.accounts.close_account(Uuid::new_v4(), &token()).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_close_rejects_non_zero_balance() {
    let (bank, ctx) = test_context(FixedRates::new());
    let user = seed_user(&bank, "ivan").await;
    let account = seed_account(&bank, &user, Currency::Rub, Decimal::new(1, 2)).await;

    let result = ctx.accounts.close_account(account.id, &token()).await;
    assert!(matches!(result, Err(Error::StateConflict(_))));

    let unchanged = ctx.accounts.get_account(account.id, &token()).await.unwrap();
    assert!(unchanged.is_open);
}

#[tokio::test]
async fn test_close_rejects_already_closed_account() {
    let (bank, ctx) = test_context(FixedRates::new());
    let user = seed_user(&bank, "ivan").await;
    let account = seed_account(&bank, &user, Currency::Rub, Decimal::ZERO).await;

    ctx.accounts.close_account(account.id, &token()).await.unwrap();
    let result = ctx.accounts.close_account(account.id, &token()).await;
    assert!(matches!(result, Err(Error::StateConflict(_))));
}

#[tokio::test]
async fn test_close_sets_close_date_and_commits_once() {
    let (bank, ctx) = test_context(FixedRates::new());
    let user = seed_user(&bank, "ivan").await;
    let account = seed_account(&bank, &user, Currency::Eur, Decimal::ZERO).await;
    let commits_before = bank.commits();

    ctx.accounts.close_account(account.id, &token()).await.unwrap();

    assert_eq!(bank.commits(), commits_before + 1);
    let closed = ctx.accounts.get_account(account.id, &token()).await.unwrap();
    assert!(!closed.is_open);
    assert!(closed.close_date.is_some());
    assert_eq!(closed.amount, Decimal::ZERO);
}

// ============================================================================
// Commission Quoting
// ============================================================================

#[tokio::test]
async fn test_commission_is_zero_between_same_owner_accounts() {
    let (bank, ctx) = test_context(FixedRates::new());
    let user = seed_user(&bank, "ivan").await;
    let a = seed_account(&bank, &user, Currency::Rub, Decimal::new(10000, 2)).await;
    let b = seed_account(&bank, &user, Currency::Eur, Decimal::ZERO).await;

    let commission = ctx
        .accounts
        .calculate_commission(Decimal::new(10000, 2), a.id, b.id, &token())
        .await
        .unwrap();
    assert_eq!(commission, Decimal::ZERO);
}

#[tokio::test]
async fn test_commission_is_fixed_share_between_different_owners() {
    let (bank, ctx) = test_context(FixedRates::new());
    let ivan = seed_user(&bank, "ivan").await;
    let maria = seed_user(&bank, "maria").await;
    let a = seed_account(&bank, &ivan, Currency::Rub, Decimal::new(10000, 2)).await;
    let b = seed_account(&bank, &maria, Currency::Rub, Decimal::ZERO).await;

    let commission = ctx
        .accounts
        .calculate_commission(Decimal::new(10000, 2), a.id, b.id, &token())
        .await
        .unwrap();
    assert_eq!(commission, Decimal::new(200, 2)); // 2% of 100.00
}

#[tokio::test]
async fn test_commission_requires_both_accounts_to_exist() {
    let (bank, ctx) = test_context(FixedRates::new());
    let user = seed_user(&bank, "ivan").await;
    let a = seed_account(&bank, &user, Currency::Rub, Decimal::new(10000, 2)).await;

    let result = ctx
        .accounts
        .calculate_commission(Decimal::new(100, 2), a.id, Uuid::new_v4(), &token())
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    let result = ctx
        .accounts
        .calculate_commission(Decimal::new(100, 2), Uuid::new_v4(), a.id, &token())
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_commission_quote_does_not_commit() {
    let (bank, ctx) = test_context(FixedRates::new());
    let ivan = seed_user(&bank, "ivan").await;
    let maria = seed_user(&bank, "maria").await;
    let a = seed_account(&bank, &ivan, Currency::Rub, Decimal::new(10000, 2)).await;
    let b = seed_account(&bank, &maria, Currency::Rub, Decimal::ZERO).await;
    let commits_before = bank.commits();

    ctx.accounts
        .calculate_commission(Decimal::new(10000, 2), a.id, b.id, &token())
        .await
        .unwrap();

    assert_eq!(bank.commits(), commits_before);
    assert_eq!(bank.staged_writes(), 0);
}
