//! 关节状态代数的属性测试
//!
//! 使用 proptest 验证数学属性。

use nalgebra::DVector;
use proptest::prelude::*;
use robostate::{JointPositions, JointVelocities};
use std::time::Duration;

fn velocities(values: Vec<f64>) -> JointVelocities {
    JointVelocities::from_values("robot", DVector::from_vec(values))
}

proptest! {
    /// 测试加法交换律
    #[test]
    fn add_commutative(
        a in prop::collection::vec(-100.0..100.0f64, 3),
        b in prop::collection::vec(-100.0..100.0f64, 3),
    ) {
        let v1 = velocities(a);
        let v2 = velocities(b);
        let left = v1.try_add(&v2).unwrap().values().unwrap();
        let right = v2.try_add(&v1).unwrap().values().unwrap();
        prop_assert_eq!(left, right);
    }

    /// 测试 (v1 + v2) - v2 在浮点容差内还原 v1
    #[test]
    fn add_sub_inverts(
        a in prop::collection::vec(-100.0..100.0f64, 3),
        b in prop::collection::vec(-100.0..100.0f64, 3),
    ) {
        let v1 = velocities(a);
        let v2 = velocities(b);
        let back = v1.try_add(&v2).unwrap().try_sub(&v2).unwrap();
        let diff = back.values().unwrap() - v1.values().unwrap();
        prop_assert!(diff.amax() < 1e-9);
    }

    /// 测试位置→速度转换是数值原样复制，1s 积分还原
    #[test]
    fn unit_time_roundtrip(values in prop::collection::vec(-100.0..100.0f64, 4)) {
        let p = JointPositions::from_values("robot", DVector::from_vec(values));
        let v = JointVelocities::from_positions(&p);
        prop_assert_eq!(v.values().unwrap(), p.values().unwrap());
        let back = v.integrate(Duration::from_secs(1)).unwrap();
        prop_assert_eq!(back.values().unwrap(), p.values().unwrap());
    }

    /// 测试积分的标量语义：每个分量等于 velocity * dt
    #[test]
    fn integrate_scales_by_dt(
        values in prop::collection::vec(-10.0..10.0f64, 2),
        dt_ms in 1u64..10_000,
    ) {
        let v = velocities(values.clone());
        let p = v.integrate(Duration::from_millis(dt_ms)).unwrap();
        let dt = dt_ms as f64 / 1000.0;
        let got = p.values().unwrap();
        for (i, value) in values.iter().enumerate() {
            prop_assert!((got[i] - value * dt).abs() < 1e-9);
        }
    }

    /// 测试缩放与除法互逆（非零标量）
    #[test]
    fn scale_div_inverts(
        values in prop::collection::vec(-100.0..100.0f64, 3),
        lambda in prop::sample::select(vec![-3.0, -0.5, 0.25, 2.0, 10.0]),
    ) {
        let v = velocities(values);
        let back = v.scale(lambda).unwrap().try_div(lambda).unwrap();
        let diff = back.values().unwrap() - v.values().unwrap();
        prop_assert!(diff.amax() < 1e-9);
    }

    /// 测试增益与增益除法互逆（非零分量）
    #[test]
    fn gains_invert(
        values in prop::collection::vec(-100.0..100.0f64, 3),
        gains in prop::collection::vec(prop::sample::select(vec![-2.0, 0.5, 1.5, 4.0]), 3),
    ) {
        let v = velocities(values);
        let gains = DVector::from_vec(gains);
        let back = v.apply_gains(&gains).unwrap().try_div_gains(&gains).unwrap();
        let diff = back.values().unwrap() - v.values().unwrap();
        prop_assert!(diff.amax() < 1e-9);
    }
}
