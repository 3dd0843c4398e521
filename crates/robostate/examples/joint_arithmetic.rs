//! 关节状态算术演示
//!
//! 展示状态值的构造、运动学阶次转换和不变量检查。
//!
//! # 运行
//!
//! ```bash
//! RUST_LOG=robostate=trace cargo run --example joint_arithmetic
//! ```

use nalgebra::DVector;
use robostate::{JointPositions, JointVelocities};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. 构造命名的关节位置
    let p = JointPositions::with_names_and_values(
        "robot",
        vec!["j0".to_string(), "j1".to_string()],
        DVector::from_vec(vec![1.0, 2.0]),
    )?;
    println!("{p}\n");

    // 2. 单位时间约定：位置 → 速度
    let v = JointVelocities::from_positions(&p);
    println!("{v}\n");

    // 3. 速度 × 时间步 → 位移
    let displacement = v.integrate(Duration::from_millis(500))?;
    println!("{displacement}\n");

    // 4. 非变异加法：p 保持不变
    let p2 = p.try_add_values(&DVector::from_vec(vec![0.1, 0.1]))?;
    println!("{p2}\n");
    println!("original unchanged: {}\n", p);

    // 5. 不变量违规：empty 状态被拒绝（开启 RUST_LOG 可见 trace 事件）
    let empty = JointVelocities::with_joint_count("robot", 2);
    match empty.values() {
        Err(err) => println!("rejected as expected: {err}"),
        Ok(_) => unreachable!(),
    }

    Ok(())
}
