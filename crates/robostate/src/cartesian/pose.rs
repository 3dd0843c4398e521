//! 笛卡尔位姿
//!
//! 位置与姿态四元数槽位的专用视图。位姿不参与逐元素算术
//! （四元数没有分量式加法的物理意义），它的来源之一是速度旋量
//! 在一个时间步上的位移：`position = v·dt`，`orientation = exp(ω·dt)`。

use crate::cartesian::{CartesianState, CartesianTwist, format_quaternion, format_vector3};
use crate::error::Result;
use crate::state::StateKind;
use nalgebra::{DVector, UnitQuaternion, Vector3};
use std::fmt;
use std::time::Duration;

/// 笛卡尔位姿（位置 + 姿态四元数）
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartesianPose(pub(crate) CartesianState);

impl CartesianPose {
    /// 创建空位姿，参考系默认为 world
    pub fn new(name: impl Into<String>) -> Self {
        CartesianPose(CartesianState::typed(StateKind::CartesianPose, name, None))
    }

    /// 创建空位姿并指定参考系
    pub fn with_reference_frame(
        name: impl Into<String>,
        reference_frame: impl Into<String>,
    ) -> Self {
        CartesianPose(CartesianState::typed(
            StateKind::CartesianPose,
            name,
            Some(reference_frame.into()),
        ))
    }

    /// 由位置坐标构造，姿态为单位四元数
    pub fn from_position(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        let mut pose = Self::new(name);
        pose.0.set_position(Vector3::new(x, y, z));
        pose
    }

    /// 由位置和姿态构造
    pub fn with_position_orientation(
        name: impl Into<String>,
        position: Vector3<f64>,
        orientation: UnitQuaternion<f64>,
    ) -> Self {
        let mut pose = Self::new(name);
        pose.0.set_position(position);
        pose.0.set_orientation(orientation);
        pose
    }

    /// 由族根状态重解释构造
    pub fn from_cartesian_state(state: &CartesianState) -> Self {
        CartesianPose(state.retagged(StateKind::CartesianPose))
    }

    /// 由速度旋量乘以时间步构造位移
    ///
    /// [`CartesianTwist::integrate`] 的反向操作数形式。
    pub fn from_twist(twist: &CartesianTwist, dt: Duration) -> Result<Self> {
        twist.integrate(dt)
    }

    /// 位置
    pub fn position(&self) -> Result<Vector3<f64>> {
        self.0.position()
    }

    /// 姿态四元数
    pub fn orientation(&self) -> Result<UnitQuaternion<f64>> {
        self.0.orientation()
    }

    /// 赋值位置（初始化路径，清除 empty）
    pub fn set_position(&mut self, position: Vector3<f64>) {
        self.0.set_position(position);
    }

    /// 赋值姿态（初始化路径，清除 empty）
    pub fn set_orientation(&mut self, orientation: UnitQuaternion<f64>) {
        self.0.set_orientation(orientation);
    }

    /// 面向传输层的扁平向量：`[px py pz qw qx qy qz]`
    pub fn values(&self) -> Result<DVector<f64>> {
        self.0.assert_not_empty()?;
        let p = self.0.position;
        let q = self.0.orientation;
        Ok(DVector::from_vec(vec![p.x, p.y, p.z, q.w, q.i, q.j, q.k]))
    }

    /// 所属实体名称
    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// 参考系名称
    #[inline]
    pub fn reference_frame(&self) -> &str {
        self.0.reference_frame()
    }

    /// 重设参考系（纯标签重贴，不变换位姿）
    pub fn set_reference_frame(&mut self, reference_frame: impl Into<String>) {
        self.0.set_reference_frame(reference_frame);
    }

    /// 是否尚未赋值
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 显式重置为 empty
    pub fn reset(&mut self) {
        self.0.reset();
    }

    /// 兼容性判定：名称与参考系都相等
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.0.is_compatible(&other.0)
    }

    /// 族根状态视图
    #[inline]
    pub fn as_cartesian_state(&self) -> &CartesianState {
        &self.0
    }

    /// 消耗自身转为族根状态
    pub fn into_cartesian_state(self) -> CartesianState {
        self.0
    }
}

impl fmt::Display for CartesianPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.spatial)?;
        if self.0.is_empty() {
            return Ok(());
        }
        writeln!(f, "position: [{}]", format_vector3(&self.0.position))?;
        write!(f, "orientation: [{}]", format_quaternion(&self.0.orientation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;

    /// 测试位置构造与扁平向量输出
    #[test]
    fn test_from_position_values() {
        let pose = CartesianPose::from_position("tool", 1.0, 2.0, 3.0);
        let values = pose.values().unwrap();
        assert_eq!(values.len(), 7);
        assert_eq!(values[0], 1.0);
        assert_eq!(values[3], 1.0); // 单位四元数 w 分量
        assert_eq!(values[4], 0.0);
    }

    /// 测试 empty 位姿取值被拒绝
    #[test]
    fn test_empty_pose_rejected() {
        let pose = CartesianPose::new("tool");
        assert!(matches!(
            pose.position(),
            Err(StateError::EmptyState { .. })
        ));
        assert!(matches!(pose.values(), Err(StateError::EmptyState { .. })));
    }

    /// 测试参考系重贴不改动位姿数值
    #[test]
    fn test_relabel_keeps_values() {
        let mut pose = CartesianPose::from_position("tool", 1.0, 0.0, 0.0);
        pose.set_reference_frame("base");
        assert_eq!(pose.reference_frame(), "base");
        assert_eq!(pose.position().unwrap(), Vector3::new(1.0, 0.0, 0.0));
    }
}
