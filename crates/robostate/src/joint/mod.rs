//! 关节空间状态族
//!
//! [`JointState`] 携带一份有序关节名列表和四个等长的并行向量
//! （位置 / 速度 / 加速度 / 力矩），索引与关节名按位置一一对应。
//! 四个专用类型 [`JointPositions`]、[`JointVelocities`]、
//! [`JointAccelerations`]、[`JointTorques`] 是对同一底层表示的
//! 重解释视图：跨子类型构造复制全部四个槽位并改写种类标签，
//! 其余三个槽位按约定视为过期值。
//!
//! # 兼容性
//!
//! 关节状态之间的二元运算要求实体名称相等且关节名序列逐项相等，
//! 顺序敏感（索引对应是按位置的）。内容相同但顺序不同的两个状态
//! 不兼容。
//!
//! # 示例
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
//! let v = JointVelocities::from_positions(&p);
//! let displacement = v.integrate(Duration::from_millis(500))?;
//! assert_eq!(displacement.values()?, DVector::from_vec(vec![0.5, 1.0]));
//! # Ok::<(), robostate::StateError>(())
//! ```

mod accelerations;
mod positions;
mod torques;
mod velocities;

pub use accelerations::JointAccelerations;
pub use positions::JointPositions;
pub use torques::JointTorques;
pub use velocities::JointVelocities;

use crate::error::{Result, StateError};
use crate::state::{State, StateKind};
use nalgebra::DVector;
use std::fmt;
use tracing::trace;

/// 关节空间状态：有序关节名 + 四个等长并行向量
///
/// 不变量：四个向量长度恒等于关节数 `n`。关节名要求互不相同，
/// 由调用方保证（本类型不校验唯一性，与兼容性检查共同兜底）。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointState {
    pub(crate) state: State,
    pub(crate) joint_names: Vec<String>,
    pub(crate) positions: DVector<f64>,
    pub(crate) velocities: DVector<f64>,
    pub(crate) accelerations: DVector<f64>,
    pub(crate) torques: DVector<f64>,
}

impl JointState {
    /// 创建零关节的空状态
    pub fn new(name: impl Into<String>) -> Self {
        Self::typed(StateKind::JointState, name, Vec::new())
    }

    /// 创建 `n` 个关节的状态，关节名自动生成为 `joint0..joint{n-1}`
    ///
    /// 向量全部清零，但状态仍为 empty：只给定形状、未赋值。
    pub fn with_joint_count(name: impl Into<String>, joint_count: usize) -> Self {
        Self::typed(StateKind::JointState, name, auto_joint_names(joint_count))
    }

    /// 创建状态并显式给定关节名列表
    pub fn with_joint_names(name: impl Into<String>, joint_names: Vec<String>) -> Self {
        Self::typed(StateKind::JointState, name, joint_names)
    }

    /// 指定种类标签的内部构造（专用类型使用）
    pub(crate) fn typed(
        kind: StateKind,
        name: impl Into<String>,
        joint_names: Vec<String>,
    ) -> Self {
        let n = joint_names.len();
        JointState {
            state: State::new(kind, name),
            joint_names,
            positions: DVector::zeros(n),
            velocities: DVector::zeros(n),
            accelerations: DVector::zeros(n),
            torques: DVector::zeros(n),
        }
    }

    /// 复制全部槽位并改写种类标签（跨子类型重解释）
    pub(crate) fn retagged(&self, kind: StateKind) -> Self {
        JointState {
            state: self.state.with_kind(kind),
            joint_names: self.joint_names.clone(),
            positions: self.positions.clone(),
            velocities: self.velocities.clone(),
            accelerations: self.accelerations.clone(),
            torques: self.torques.clone(),
        }
    }

    /// 种类标签
    #[inline]
    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    /// 所属实体名称
    #[inline]
    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// 修改所属实体名称
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.set_name(name);
    }

    /// 是否尚未赋值
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// 显式重置为 empty
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// 有序关节名列表（身份元数据，empty 时也可读）
    #[inline]
    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    /// 关节数
    #[inline]
    pub fn num_joints(&self) -> usize {
        self.joint_names.len()
    }

    /// 兼容性判定：名称相等且关节名序列逐项相等
    pub fn is_compatible(&self, other: &JointState) -> bool {
        self.state.is_compatible(&other.state) && self.joint_names == other.joint_names
    }

    /// 位置向量
    pub fn positions(&self) -> Result<&DVector<f64>> {
        self.assert_not_empty()?;
        Ok(&self.positions)
    }

    /// 速度向量
    pub fn velocities(&self) -> Result<&DVector<f64>> {
        self.assert_not_empty()?;
        Ok(&self.velocities)
    }

    /// 加速度向量
    pub fn accelerations(&self) -> Result<&DVector<f64>> {
        self.assert_not_empty()?;
        Ok(&self.accelerations)
    }

    /// 力矩向量
    pub fn torques(&self) -> Result<&DVector<f64>> {
        self.assert_not_empty()?;
        Ok(&self.torques)
    }

    /// 赋值位置向量（初始化路径，清除 empty）
    pub fn set_positions(&mut self, positions: DVector<f64>) -> Result<()> {
        self.assert_dimension(positions.len())?;
        self.positions = positions;
        self.state.set_filled();
        Ok(())
    }

    /// 赋值速度向量（初始化路径，清除 empty）
    pub fn set_velocities(&mut self, velocities: DVector<f64>) -> Result<()> {
        self.assert_dimension(velocities.len())?;
        self.velocities = velocities;
        self.state.set_filled();
        Ok(())
    }

    /// 赋值加速度向量（初始化路径，清除 empty）
    pub fn set_accelerations(&mut self, accelerations: DVector<f64>) -> Result<()> {
        self.assert_dimension(accelerations.len())?;
        self.accelerations = accelerations;
        self.state.set_filled();
        Ok(())
    }

    /// 赋值力矩向量（初始化路径，清除 empty）
    pub fn set_torques(&mut self, torques: DVector<f64>) -> Result<()> {
        self.assert_dimension(torques.len())?;
        self.torques = torques;
        self.state.set_filled();
        Ok(())
    }

    // ==================== 不变量检查 ====================
    // 所有检查在任何修改之前完成（强异常安全）。

    /// empty 检查：取值与运算的入口前置条件
    pub(crate) fn assert_not_empty(&self) -> Result<()> {
        if self.state.is_empty() {
            trace!(
                name = %self.state.name(),
                kind = %self.state.kind(),
                "operation rejected: state is empty"
            );
            return Err(StateError::EmptyState {
                name: self.state.name().to_string(),
            });
        }
        Ok(())
    }

    /// 兼容性检查，失败时带原因
    pub(crate) fn assert_compatible(&self, other: &JointState) -> Result<()> {
        let reason = if !self.state.is_compatible(&other.state) {
            "entity names differ"
        } else if self.joint_names != other.joint_names {
            "joint name sequences differ"
        } else {
            return Ok(());
        };
        trace!(
            lhs = %self.state.name(),
            rhs = %other.state.name(),
            reason,
            "operation rejected: incompatible states"
        );
        Err(StateError::IncompatibleStates {
            lhs: self.state.name().to_string(),
            rhs: other.state.name().to_string(),
            reason: reason.to_string(),
        })
    }

    /// 维度检查：提供的向量长度必须等于关节数
    pub(crate) fn assert_dimension(&self, actual: usize) -> Result<()> {
        let expected = self.num_joints();
        if actual != expected {
            trace!(expected, actual, "operation rejected: dimension mismatch");
            return Err(StateError::DimensionMismatch { expected, actual });
        }
        Ok(())
    }

    /// 二元运算前置检查：双方非 empty 且兼容
    pub(crate) fn binary_guard(&self, other: &JointState) -> Result<()> {
        self.assert_not_empty()?;
        other.assert_not_empty()?;
        self.assert_compatible(other)
    }

    /// 标量除数检查
    pub(crate) fn assert_nonzero_scalar(lambda: f64) -> Result<()> {
        if lambda == 0.0 {
            return Err(StateError::DivisionByZero);
        }
        Ok(())
    }

    /// 增益数组除数检查：任何零分量都拒绝
    pub(crate) fn assert_nonzero_gains(gains: &DVector<f64>) -> Result<()> {
        if gains.iter().any(|g| *g == 0.0) {
            return Err(StateError::DivisionByZero);
        }
        Ok(())
    }
}

impl fmt::Display for JointState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.state)?;
        writeln!(f, "joint names: [{}]", self.joint_names.join(", "))?;
        if self.state.is_empty() {
            return Ok(());
        }
        writeln!(f, "positions: [{}]", format_values(&self.positions))?;
        writeln!(f, "velocities: [{}]", format_values(&self.velocities))?;
        writeln!(f, "accelerations: [{}]", format_values(&self.accelerations))?;
        write!(f, "torques: [{}]", format_values(&self.torques))
    }
}

/// 自动生成 `joint0..joint{n-1}` 关节名
pub(crate) fn auto_joint_names(joint_count: usize) -> Vec<String> {
    (0..joint_count).map(|i| format!("joint{i}")).collect()
}

/// 诊断输出用的向量格式化
pub(crate) fn format_values(values: &DVector<f64>) -> String {
    values
        .iter()
        .map(|v| format!("{v:.4}"))
        .collect::<Vec<_>>()
        .join(", ")
}
