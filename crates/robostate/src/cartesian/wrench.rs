//! 笛卡尔力旋量
//!
//! 力与力矩槽位的专用视图，6 维排布为 `[fx fy fz tx ty tz]`。
//! 不参与任何时间步转换。

use crate::cartesian::{
    CartesianState, assert_nonzero_gains, assert_nonzero_scalar, format_vector3, join_vector6,
    split_vector6,
};
use crate::error::Result;
use crate::state::StateKind;
use nalgebra::{Vector3, Vector6};
use std::fmt;

/// 笛卡尔力旋量（力 + 力矩）
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartesianWrench(pub(crate) CartesianState);

impl CartesianWrench {
    /// 创建空力旋量，参考系默认为 world
    pub fn new(name: impl Into<String>) -> Self {
        CartesianWrench(CartesianState::typed(
            StateKind::CartesianWrench,
            name,
            None,
        ))
    }

    /// 创建空力旋量并指定参考系
    pub fn with_reference_frame(
        name: impl Into<String>,
        reference_frame: impl Into<String>,
    ) -> Self {
        CartesianWrench(CartesianState::typed(
            StateKind::CartesianWrench,
            name,
            Some(reference_frame.into()),
        ))
    }

    /// 由 6 维向量构造
    pub fn from_values(name: impl Into<String>, values: Vector6<f64>) -> Self {
        let mut wrench = Self::new(name);
        wrench.set_values(values);
        wrench
    }

    /// 由族根状态重解释构造
    pub fn from_cartesian_state(state: &CartesianState) -> Self {
        CartesianWrench(state.retagged(StateKind::CartesianWrench))
    }

    /// 力旋量向量 `[fx fy fz tx ty tz]` 的拷贝
    pub fn values(&self) -> Result<Vector6<f64>> {
        self.0.assert_not_empty()?;
        Ok(join_vector6(&self.0.force, &self.0.torque))
    }

    /// 赋值力旋量向量（初始化路径，清除 empty）
    pub fn set_values(&mut self, values: Vector6<f64>) {
        let (force, torque) = split_vector6(&values);
        self.0.set_force(force);
        self.0.set_torque(torque);
    }

    /// 力
    pub fn force(&self) -> Result<Vector3<f64>> {
        self.0.force()
    }

    /// 力矩
    pub fn torque(&self) -> Result<Vector3<f64>> {
        self.0.torque()
    }

    /// 逐元素加法，返回新值
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.force += other.0.force;
        out.0.torque += other.0.torque;
        Ok(out)
    }

    /// 与原始 6 维向量逐元素加法，返回新值
    pub fn try_add_values(&self, values: &Vector6<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        let (force, torque) = split_vector6(values);
        let mut out = self.clone();
        out.0.force += force;
        out.0.torque += torque;
        Ok(out)
    }

    /// 原地逐元素加法
    pub fn try_add_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.force += other.0.force;
        self.0.torque += other.0.torque;
        Ok(())
    }

    /// 逐元素减法，返回新值
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.force -= other.0.force;
        out.0.torque -= other.0.torque;
        Ok(out)
    }

    /// 与原始 6 维向量逐元素减法，返回新值
    pub fn try_sub_values(&self, values: &Vector6<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        let (force, torque) = split_vector6(values);
        let mut out = self.clone();
        out.0.force -= force;
        out.0.torque -= torque;
        Ok(out)
    }

    /// 原地逐元素减法
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.force -= other.0.force;
        self.0.torque -= other.0.torque;
        Ok(())
    }

    /// 标量缩放，返回新值
    pub fn scale(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        let mut out = self.clone();
        out.0.force *= lambda;
        out.0.torque *= lambda;
        Ok(out)
    }

    /// 原地标量缩放
    pub fn scale_assign(&mut self, lambda: f64) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.force *= lambda;
        self.0.torque *= lambda;
        Ok(())
    }

    /// 逐分量独立增益（Hadamard 积），返回新值
    pub fn apply_gains(&self, gains: &Vector6<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        let (fg, tg) = split_vector6(gains);
        let mut out = self.clone();
        out.0.force = out.0.force.component_mul(&fg);
        out.0.torque = out.0.torque.component_mul(&tg);
        Ok(out)
    }

    /// 标量除法；除数为零显式失败
    pub fn try_div(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        assert_nonzero_scalar(lambda)?;
        let mut out = self.clone();
        out.0.force /= lambda;
        out.0.torque /= lambda;
        Ok(out)
    }

    /// 逐分量增益除法；任何零分量都显式失败
    pub fn try_div_gains(&self, gains: &Vector6<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        assert_nonzero_gains(gains)?;
        let (fg, tg) = split_vector6(gains);
        let mut out = self.clone();
        out.0.force = out.0.force.component_div(&fg);
        out.0.torque = out.0.torque.component_div(&tg);
        Ok(out)
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

    /// 重设参考系（纯标签重贴，不变换数值）
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

impl fmt::Display for CartesianWrench {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.spatial)?;
        if self.0.is_empty() {
            return Ok(());
        }
        writeln!(f, "force: [{}]", format_vector3(&self.0.force))?;
        write!(f, "torque: [{}]", format_vector3(&self.0.torque))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;

    /// 测试力旋量叠加（例如接触力合成）
    #[test]
    fn test_wrench_superposition() {
        let a = CartesianWrench::from_values("tool", Vector6::new(1.0, 0.0, 0.0, 0.0, 0.1, 0.0));
        let b = CartesianWrench::from_values("tool", Vector6::new(0.0, 2.0, 0.0, 0.0, 0.1, 0.0));
        let sum = a.try_add(&b).unwrap();
        assert_eq!(
            sum.values().unwrap(),
            Vector6::new(1.0, 2.0, 0.0, 0.0, 0.2, 0.0)
        );
        // 非变异：a 不变
        assert_eq!(a.force().unwrap(), Vector3::new(1.0, 0.0, 0.0));
    }

    /// 测试 empty 力旋量被拒绝
    #[test]
    fn test_empty_rejected() {
        let w = CartesianWrench::new("tool");
        assert!(matches!(w.values(), Err(StateError::EmptyState { .. })));
        assert!(matches!(w.scale(2.0), Err(StateError::EmptyState { .. })));
    }
}
