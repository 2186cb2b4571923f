//! 积分兑换集成测试
//!
//! 覆盖兑换守卫链的每一步失败路径以及成功兑换后的状态变化。

use loyalty_ledger::dto::{CustomerDraft, ProgramUpdate};
use loyalty_ledger::{Customer, LedgerState, LoyaltyError, TransactionType};
use loyalty_shared::test_utils::{test_sale_id, test_storage};

// ==================== 辅助函数 ====================

fn setup_state() -> LedgerState {
    LedgerState::new(test_storage())
}

/// 建档一个客户并通过销售累计把余额充到指定值
fn customer_with_points(state: &LedgerState, points: i64) -> Customer {
    let customer = state
        .customers
        .upsert_customer(CustomerDraft {
            name: "Carlos Pereira".to_string(),
            ..Default::default()
        })
        .expect("客户建档失败");

    if points > 0 {
        state
            .accrual
            .register_points_for_sale(&customer.id, points as f64, &test_sale_id())
            .expect("销售累计失败")
            .expect("应产生积分交易");
    }

    state.customers.get_customer(&customer.id).unwrap().unwrap()
}

fn enabled_update() -> ProgramUpdate {
    ProgramUpdate {
        enabled: Some(true),
        welcome_bonus: Some(0),
        minimum_redemption: Some(100),
        ..Default::default()
    }
}

// ==================== 成功路径 ====================

#[test]
fn test_redeem_success_updates_balance_and_ledger() {
    let state = setup_state();
    state.programs.update_program(enabled_update()).unwrap();
    let customer = customer_with_points(&state, 500);

    let tx = state
        .redemption
        .redeem_points(&customer.id, 200, "Resgate: desconto na compra")
        .unwrap();

    assert_eq!(tx.change_type, TransactionType::Redeem);
    assert_eq!(tx.points, 200);
    assert_eq!(tx.balance, 300);

    let stored = state.customers.get_customer(&customer.id).unwrap().unwrap();
    assert_eq!(stored.points, 300);

    let audit = state.queries.audit_balance(&customer.id).unwrap();
    assert!(audit.is_consistent());
}

#[test]
fn test_calculate_redemption_value() {
    let state = setup_state();
    state
        .programs
        .update_program(ProgramUpdate {
            redemption_rate: Some(0.05),
            ..enabled_update()
        })
        .unwrap();

    // 200 * 0.05
    assert_eq!(state.redemption.calculate_redemption_value(200).unwrap(), 10.0);
    // 低于最低兑换门槛
    assert_eq!(state.redemption.calculate_redemption_value(99).unwrap(), 0.0);
}

// ==================== 守卫失败路径 ====================

#[test]
fn test_redeem_fails_when_program_disabled() {
    let state = setup_state();
    // 计划保持默认（未启用），直接手工建档
    let customer = state
        .customers
        .upsert_customer(CustomerDraft {
            name: "Ana Costa".to_string(),
            ..Default::default()
        })
        .unwrap();

    let err = state
        .redemption
        .redeem_points(&customer.id, 200, "resgate")
        .unwrap_err();
    assert!(matches!(err, LoyaltyError::ProgramDisabled));
}

#[test]
fn test_redeem_fails_for_unknown_customer() {
    let state = setup_state();
    state.programs.update_program(enabled_update()).unwrap();

    let err = state
        .redemption
        .redeem_points("CUS-nao-existe", 200, "resgate")
        .unwrap_err();
    assert!(matches!(err, LoyaltyError::CustomerNotFound(_)));
}

#[test]
fn test_redeem_below_minimum_keeps_state_untouched() {
    let state = setup_state();
    state.programs.update_program(enabled_update()).unwrap();
    let customer = customer_with_points(&state, 500);

    let err = state
        .redemption
        .redeem_points(&customer.id, 50, "resgate")
        .unwrap_err();
    assert!(matches!(
        err,
        LoyaltyError::BelowMinimumRedemption {
            minimum: 100,
            requested: 50
        }
    ));

    // 余额与流水均未变化
    let stored = state.customers.get_customer(&customer.id).unwrap().unwrap();
    assert_eq!(stored.points, 500);
    assert_eq!(state.queries.customer_history(&customer.id).unwrap().len(), 1);
}

#[test]
fn test_redeem_insufficient_balance_creates_no_transaction() {
    let state = setup_state();
    state.programs.update_program(enabled_update()).unwrap();
    let customer = customer_with_points(&state, 120);

    let err = state
        .redemption
        .redeem_points(&customer.id, 150, "resgate")
        .unwrap_err();
    assert!(matches!(
        err,
        LoyaltyError::InsufficientBalance {
            available: 120,
            requested: 150
        }
    ));

    let stored = state.customers.get_customer(&customer.id).unwrap().unwrap();
    assert_eq!(stored.points, 120);
    assert_eq!(state.queries.customer_history(&customer.id).unwrap().len(), 1);
}
