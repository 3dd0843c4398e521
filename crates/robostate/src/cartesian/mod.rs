//! 笛卡尔空间状态族
//!
//! 关节族的6自由度镜像，经由 [`SpatialState`] 携带参考系：
//! [`CartesianState`] 持有位姿（位置 + 姿态四元数）、速度旋量
//! （线速度 + 角速度）与力旋量（力 + 力矩）三组槽位，
//! [`CartesianPose`]、[`CartesianTwist`]、[`CartesianWrench`]
//! 是对各槽位的重解释视图。
//!
//! # 兼容性
//!
//! 二元运算要求实体名称和参考系都相等（[`SpatialState::is_compatible`]）。
//! 固定的 6 维由类型系统保证，不存在运行期维度不一致。
//!
//! # 示例
//!
//! ```rust
//! use nalgebra::Vector6;
//! use robostate::CartesianTwist;
//! use std::time::Duration;
//!
//! let twist = CartesianTwist::from_values(
//!     "tool",
//!     Vector6::new(0.1, 0.0, 0.0, 0.0, 0.0, 0.5),
//! );
//! let pose = twist.integrate(Duration::from_secs(2))?;
//! assert!((pose.position()?.x - 0.2).abs() < 1e-12);
//! # Ok::<(), robostate::StateError>(())
//! ```

mod pose;
mod twist;
mod wrench;

pub use pose::CartesianPose;
pub use twist::CartesianTwist;
pub use wrench::CartesianWrench;

use crate::error::{Result, StateError};
use crate::spatial::SpatialState;
use crate::state::StateKind;
use nalgebra::{UnitQuaternion, Vector3, Vector6};
use std::fmt;
use tracing::trace;

/// 笛卡尔空间状态：参考系身份 + 位姿 / 速度旋量 / 力旋量槽位
///
/// 跨子类型构造复制全部槽位并改写种类标签；非本视图的槽位
/// 按约定视为过期值。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartesianState {
    pub(crate) spatial: SpatialState,
    pub(crate) position: Vector3<f64>,
    pub(crate) orientation: UnitQuaternion<f64>,
    pub(crate) linear_velocity: Vector3<f64>,
    pub(crate) angular_velocity: Vector3<f64>,
    pub(crate) force: Vector3<f64>,
    pub(crate) torque: Vector3<f64>,
}

impl CartesianState {
    /// 创建空状态，参考系默认为 world
    pub fn new(name: impl Into<String>) -> Self {
        Self::typed(StateKind::CartesianState, name, None)
    }

    /// 创建空状态并指定参考系
    pub fn with_reference_frame(
        name: impl Into<String>,
        reference_frame: impl Into<String>,
    ) -> Self {
        Self::typed(StateKind::CartesianState, name, Some(reference_frame.into()))
    }

    /// 指定种类标签的内部构造（专用类型使用）
    pub(crate) fn typed(
        kind: StateKind,
        name: impl Into<String>,
        reference_frame: Option<String>,
    ) -> Self {
        let spatial = match reference_frame {
            Some(frame) => SpatialState::with_reference_frame(kind, name, frame),
            None => SpatialState::new(kind, name),
        };
        CartesianState {
            spatial,
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            force: Vector3::zeros(),
            torque: Vector3::zeros(),
        }
    }

    /// 复制全部槽位并改写种类标签（跨子类型重解释）
    pub(crate) fn retagged(&self, kind: StateKind) -> Self {
        let mut out = self.clone();
        out.spatial = self.spatial.with_kind(kind);
        out
    }

    /// 种类标签
    #[inline]
    pub fn kind(&self) -> StateKind {
        self.spatial.kind()
    }

    /// 所属实体名称
    #[inline]
    pub fn name(&self) -> &str {
        self.spatial.name()
    }

    /// 参考系名称
    #[inline]
    pub fn reference_frame(&self) -> &str {
        self.spatial.reference_frame()
    }

    /// 重设参考系（纯标签重贴，不变换数值）
    pub fn set_reference_frame(&mut self, reference_frame: impl Into<String>) {
        self.spatial.set_reference_frame(reference_frame);
    }

    /// 是否尚未赋值
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spatial.is_empty()
    }

    /// 显式重置为 empty
    pub fn reset(&mut self) {
        self.spatial.reset();
    }

    /// 兼容性判定：名称与参考系都相等
    pub fn is_compatible(&self, other: &CartesianState) -> bool {
        self.spatial.is_compatible(&other.spatial)
    }

    /// 位置
    pub fn position(&self) -> Result<Vector3<f64>> {
        self.assert_not_empty()?;
        Ok(self.position)
    }

    /// 姿态四元数
    pub fn orientation(&self) -> Result<UnitQuaternion<f64>> {
        self.assert_not_empty()?;
        Ok(self.orientation)
    }

    /// 线速度
    pub fn linear_velocity(&self) -> Result<Vector3<f64>> {
        self.assert_not_empty()?;
        Ok(self.linear_velocity)
    }

    /// 角速度
    pub fn angular_velocity(&self) -> Result<Vector3<f64>> {
        self.assert_not_empty()?;
        Ok(self.angular_velocity)
    }

    /// 力
    pub fn force(&self) -> Result<Vector3<f64>> {
        self.assert_not_empty()?;
        Ok(self.force)
    }

    /// 力矩
    pub fn torque(&self) -> Result<Vector3<f64>> {
        self.assert_not_empty()?;
        Ok(self.torque)
    }

    /// 赋值位置（初始化路径，清除 empty）
    pub fn set_position(&mut self, position: Vector3<f64>) {
        self.position = position;
        self.spatial.set_filled();
    }

    /// 赋值姿态（初始化路径，清除 empty）
    pub fn set_orientation(&mut self, orientation: UnitQuaternion<f64>) {
        self.orientation = orientation;
        self.spatial.set_filled();
    }

    /// 赋值线速度（初始化路径，清除 empty）
    pub fn set_linear_velocity(&mut self, linear_velocity: Vector3<f64>) {
        self.linear_velocity = linear_velocity;
        self.spatial.set_filled();
    }

    /// 赋值角速度（初始化路径，清除 empty）
    pub fn set_angular_velocity(&mut self, angular_velocity: Vector3<f64>) {
        self.angular_velocity = angular_velocity;
        self.spatial.set_filled();
    }

    /// 赋值力（初始化路径，清除 empty）
    pub fn set_force(&mut self, force: Vector3<f64>) {
        self.force = force;
        self.spatial.set_filled();
    }

    /// 赋值力矩（初始化路径，清除 empty）
    pub fn set_torque(&mut self, torque: Vector3<f64>) {
        self.torque = torque;
        self.spatial.set_filled();
    }

    // ==================== 不变量检查 ====================

    /// empty 检查：取值与运算的入口前置条件
    pub(crate) fn assert_not_empty(&self) -> Result<()> {
        if self.spatial.is_empty() {
            trace!(
                name = %self.spatial.name(),
                kind = %self.spatial.kind(),
                "operation rejected: state is empty"
            );
            return Err(StateError::EmptyState {
                name: self.spatial.name().to_string(),
            });
        }
        Ok(())
    }

    /// 兼容性检查，失败时带原因
    pub(crate) fn assert_compatible(&self, other: &CartesianState) -> Result<()> {
        let reason = if self.spatial.name() != other.spatial.name() {
            "entity names differ"
        } else if self.spatial.reference_frame() != other.spatial.reference_frame() {
            "reference frames differ"
        } else {
            return Ok(());
        };
        trace!(
            lhs = %self.spatial.name(),
            rhs = %other.spatial.name(),
            reason,
            "operation rejected: incompatible states"
        );
        Err(StateError::IncompatibleStates {
            lhs: self.spatial.name().to_string(),
            rhs: other.spatial.name().to_string(),
            reason: reason.to_string(),
        })
    }

    /// 二元运算前置检查：双方非 empty 且兼容
    pub(crate) fn binary_guard(&self, other: &CartesianState) -> Result<()> {
        self.assert_not_empty()?;
        other.assert_not_empty()?;
        self.assert_compatible(other)
    }
}

impl fmt::Display for CartesianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.spatial)?;
        if self.spatial.is_empty() {
            return Ok(());
        }
        writeln!(f, "position: [{}]", format_vector3(&self.position))?;
        writeln!(f, "orientation: [{}]", format_quaternion(&self.orientation))?;
        writeln!(
            f,
            "linear/angular velocity: [{}] / [{}]",
            format_vector3(&self.linear_velocity),
            format_vector3(&self.angular_velocity)
        )?;
        write!(
            f,
            "force/torque: [{}] / [{}]",
            format_vector3(&self.force),
            format_vector3(&self.torque)
        )
    }
}

/// 标量除数检查
pub(crate) fn assert_nonzero_scalar(lambda: f64) -> Result<()> {
    if lambda == 0.0 {
        return Err(StateError::DivisionByZero);
    }
    Ok(())
}

/// 6 维增益除数检查：任何零分量都拒绝
pub(crate) fn assert_nonzero_gains(gains: &Vector6<f64>) -> Result<()> {
    if gains.iter().any(|g| *g == 0.0) {
        return Err(StateError::DivisionByZero);
    }
    Ok(())
}

/// 将 6 维向量拆为（前三维，后三维）
pub(crate) fn split_vector6(v: &Vector6<f64>) -> (Vector3<f64>, Vector3<f64>) {
    (
        Vector3::new(v[0], v[1], v[2]),
        Vector3::new(v[3], v[4], v[5]),
    )
}

/// 将两个三维向量拼为 6 维向量
pub(crate) fn join_vector6(head: &Vector3<f64>, tail: &Vector3<f64>) -> Vector6<f64> {
    Vector6::new(head.x, head.y, head.z, tail.x, tail.y, tail.z)
}

pub(crate) fn format_vector3(v: &Vector3<f64>) -> String {
    format!("{:.4}, {:.4}, {:.4}", v.x, v.y, v.z)
}

pub(crate) fn format_quaternion(q: &UnitQuaternion<f64>) -> String {
    format!("{:.4}, {:.4}, {:.4}, {:.4}", q.w, q.i, q.j, q.k)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试新状态为 empty，取值被拒绝
    #[test]
    fn test_new_state_empty() {
        let s = CartesianState::new("tool");
        assert!(s.is_empty());
        assert_eq!(s.reference_frame(), "world");
        assert!(matches!(s.position(), Err(StateError::EmptyState { .. })));
    }

    /// 测试赋值清除 empty
    #[test]
    fn test_set_clears_empty() {
        let mut s = CartesianState::new("tool");
        s.set_position(Vector3::new(1.0, 2.0, 3.0));
        assert!(!s.is_empty());
        assert_eq!(s.position().unwrap(), Vector3::new(1.0, 2.0, 3.0));
        // 其余槽位形状完好
        assert_eq!(s.force().unwrap(), Vector3::zeros());
    }

    /// 测试参考系不同 → 不兼容
    #[test]
    fn test_frame_mismatch() {
        let mut a = CartesianState::new("tool");
        let mut b = CartesianState::with_reference_frame("tool", "base");
        a.set_position(Vector3::zeros());
        b.set_position(Vector3::zeros());
        let err = a.binary_guard(&b).unwrap_err();
        assert!(matches!(err, StateError::IncompatibleStates { .. }));
    }

    /// 测试 6 维拆分 / 拼接互逆
    #[test]
    fn test_vector6_split_join() {
        let v = Vector6::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let (head, tail) = split_vector6(&v);
        assert_eq!(join_vector6(&head, &tail), v);
    }
}
