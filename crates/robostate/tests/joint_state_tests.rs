//! 关节状态族集成测试
//!
//! 覆盖端到端场景：构造 → 转换 → 算术 → 回读，以及所有
//! 不变量违规路径（empty / 不兼容 / 维度 / 除零）。

use nalgebra::DVector;
use robostate::{
    JointPositions, JointState, JointTorques, JointVelocities, StateError, StateKind,
};
use std::time::Duration;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// 完整场景：位置 → 速度 → 积分 → 非变异加法
#[test]
fn test_full_scenario() {
    let p = JointPositions::with_names_and_values(
        "robot",
        names(&["j0", "j1"]),
        DVector::from_vec(vec![1.0, 2.0]),
    )
    .unwrap();

    // 单位时间约定：数值原样复制
    let v = JointVelocities::from_positions(&p);
    assert_eq!(v.values().unwrap(), DVector::from_vec(vec![1.0, 2.0]));

    // 500ms 积分 → 半程位移
    let displacement = v.integrate(Duration::from_millis(500)).unwrap();
    assert_eq!(
        displacement.values().unwrap(),
        DVector::from_vec(vec![0.5, 1.0])
    );

    // 非变异加法：p 不变
    let p2 = p.try_add_values(&DVector::from_vec(vec![0.1, 0.1])).unwrap();
    assert_eq!(p2.values().unwrap(), DVector::from_vec(vec![1.1, 2.1]));
    assert_eq!(p.values().unwrap(), DVector::from_vec(vec![1.0, 2.0]));
}

/// 长度 1 对 2 个关节名的构造失败
#[test]
fn test_constructor_length_mismatch() {
    let err = JointPositions::with_names_and_values(
        "robot",
        names(&["j0", "j1"]),
        DVector::from_vec(vec![1.0]),
    )
    .unwrap_err();
    assert_eq!(
        err,
        StateError::DimensionMismatch {
            expected: 2,
            actual: 1
        }
    );
}

/// empty 状态上的一切操作失败，绝不静默返回零
#[test]
fn test_empty_never_returns_zeros() {
    let v = JointVelocities::with_joint_count("robot", 3);
    assert!(v.is_empty());
    assert!(matches!(v.values(), Err(StateError::EmptyState { .. })));
    assert!(matches!(v.scale(1.0), Err(StateError::EmptyState { .. })));
    assert!(matches!(
        v.integrate(Duration::from_secs(1)),
        Err(StateError::EmptyState { .. })
    ));

    let filled = JointVelocities::from_values("robot", DVector::zeros(3));
    // 操作数任一为 empty 同样失败：先检查接收者，再检查参数
    assert!(matches!(
        filled.try_add(&v),
        Err(StateError::EmptyState { .. })
    ));
    assert!(matches!(
        v.try_add(&filled),
        Err(StateError::EmptyState { .. })
    ));
}

/// 关节名内容相同、顺序不同 → 不兼容（索引对应按位置）
#[test]
fn test_same_names_different_order_incompatible() {
    let a = JointPositions::with_names_and_values(
        "robot",
        names(&["j0", "j1"]),
        DVector::from_vec(vec![1.0, 2.0]),
    )
    .unwrap();
    let b = JointPositions::with_names_and_values(
        "robot",
        names(&["j1", "j0"]),
        DVector::from_vec(vec![2.0, 1.0]),
    )
    .unwrap();
    assert!(!a.is_compatible(&b));
    let err = a.try_add(&b).unwrap_err();
    assert!(matches!(err, StateError::IncompatibleStates { .. }));
}

/// 原地运算失败时接收者保持原值（强异常安全）
#[test]
fn test_failed_mutation_leaves_receiver_unchanged() {
    let mut p = JointPositions::from_values("robot", DVector::from_vec(vec![1.0, 2.0]));
    let before = p.values().unwrap();

    let wrong_len = DVector::from_vec(vec![1.0]);
    assert!(p.try_add_values_assign(&wrong_len).is_err());
    assert_eq!(p.values().unwrap(), before);

    let other = JointPositions::from_values("other", DVector::from_vec(vec![1.0, 1.0]));
    assert!(p.try_add_assign(&other).is_err());
    assert_eq!(p.values().unwrap(), before);
}

/// 跨子类型重解释：速度由位置构造后，改回读力矩视图数值是过期的位置槽
#[test]
fn test_cross_subtype_reinterpretation_carries_slots() {
    let mut state = JointState::with_joint_names("robot", names(&["j0", "j1"]));
    state
        .set_positions(DVector::from_vec(vec![1.0, 2.0]))
        .unwrap();
    state
        .set_torques(DVector::from_vec(vec![5.0, 6.0]))
        .unwrap();

    let t = JointTorques::from_joint_state(&state);
    assert_eq!(t.as_joint_state().kind(), StateKind::JointTorques);
    assert_eq!(t.values().unwrap(), DVector::from_vec(vec![5.0, 6.0]));
    // 其余槽位原样携带
    assert_eq!(
        t.as_joint_state().positions().unwrap(),
        &DVector::from_vec(vec![1.0, 2.0])
    );
}

/// reset 之后重新开始失败，直到下一次赋值
#[test]
fn test_reset_then_reinitialize() {
    let mut v = JointVelocities::from_values("robot", DVector::from_vec(vec![1.0]));
    v.reset();
    assert!(matches!(v.values(), Err(StateError::EmptyState { .. })));
    v.set_values(DVector::from_vec(vec![3.0])).unwrap();
    assert_eq!(v.values().unwrap(), DVector::from_vec(vec![3.0]));
}

/// 回读边界：身份元数据在 empty 时也可读，数值不可
#[test]
fn test_identity_metadata_always_readable() {
    let v = JointVelocities::with_joint_names("robot", names(&["a", "b"]));
    assert_eq!(v.name(), "robot");
    assert_eq!(v.joint_names(), &["a", "b"]);
    assert_eq!(v.num_joints(), 2);
    assert!(v.values().is_err());
}

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;

    /// serde 往返保持数值与身份
    #[test]
    fn test_serde_roundtrip() {
        let p = JointPositions::with_names_and_values(
            "robot",
            names(&["j0", "j1"]),
            DVector::from_vec(vec![1.0, 2.0]),
        )
        .unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: JointPositions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
