//! # robostate
//!
//! 机器人物理状态的类型化值表示：位置 / 速度 / 加速度 / 力矩作为
//! 携带身份（实体名称、参考系）与初始化标志的命名量，支持经过检查的
//! 算术运算和有物理意义的运动学阶次转换（速度对时间步积分得到位移）。
//!
//! ## 模块
//!
//! - `state`: 种类标签与状态身份基础
//! - `spatial`: 带参考系的空间状态
//! - `joint`: 关节空间状态族（位置 / 速度 / 加速度 / 力矩）
//! - `cartesian`: 笛卡尔空间状态族（位姿 / 速度旋量 / 力旋量）
//! - `error`: 不变量违规的错误体系
//!
//! ## 不变量体系
//!
//! 数值运算本身是平凡的；本 crate 的核心是包裹在外的不变量：
//!
//! - 每个值携带身份（实体名称，空间量还有参考系）和 empty 标志
//! - 每个二元运算先验证兼容性与初始化状态再动手
//! - 失败是同步的、强异常安全的：接收者保持失败前的状态
//!
//! 本 crate 是纯值类型库：无线程、无 I/O、无内部锁。跨线程共享
//! 实例时由调用方负责外部同步。
//!
//! ## 示例
//!
//! ```rust
//! use nalgebra::DVector;
//! use robostate::{JointPositions, JointVelocities};
//! use std::time::Duration;
//!
//! let p = JointPositions::with_names_and_values(
//!     "robot",
//!     vec!["j0".to_string(), "j1".to_string()],
//!     DVector::from_vec(vec![1.0, 2.0]),
//! )?;
//!
//! // 单位时间约定：数值原样进入速度槽位
//! let v = JointVelocities::from_positions(&p);
//!
//! // 速度 × 时间步 → 位移
//! let displacement = v.integrate(Duration::from_millis(500))?;
//! assert_eq!(displacement.values()?, DVector::from_vec(vec![0.5, 1.0]));
//! # Ok::<(), robostate::StateError>(())
//! ```

pub mod cartesian;
pub mod error;
pub mod joint;
pub mod spatial;
pub mod state;

// 重新导出常用类型
pub use cartesian::{CartesianPose, CartesianState, CartesianTwist, CartesianWrench};
pub use error::{Result, StateError};
pub use joint::{
    JointAccelerations, JointPositions, JointState, JointTorques, JointVelocities,
};
pub use spatial::{DEFAULT_REFERENCE_FRAME, SpatialState};
pub use state::{State, StateKind};
