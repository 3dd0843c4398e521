//! 关节速度
//!
//! 对 [`JointState`] 速度槽位的专用视图，并承载运动学阶次之间
//! 唯一的显式转换：速度 × 时间步 → 位置（位移）。
//!
//! # 单位时间约定
//!
//! [`JointVelocities::from_positions`] 等价于"位置除以 1 秒"：
//! 数值原样复制进速度槽位。这是单位约定的便捷构造，不是真正的微分。
//!
//! # 示例
//!
//! ```rust
//! use nalgebra::DVector;
//! use robostate::{JointPositions, JointVelocities};
//! use std::time::Duration;
//!
//! let p = JointPositions::from_values("robot", DVector::from_vec(vec![1.0, 2.0]));
//! let v = JointVelocities::from_positions(&p);
//! assert_eq!(v.values()?, DVector::from_vec(vec![1.0, 2.0]));
//!
//! let displacement = v.integrate(Duration::from_millis(500))?;
//! assert_eq!(displacement.values()?, DVector::from_vec(vec![0.5, 1.0]));
//! # Ok::<(), robostate::StateError>(())
//! ```

use crate::error::Result;
use crate::joint::{JointPositions, JointState, auto_joint_names, format_values};
use crate::state::StateKind;
use nalgebra::DVector;
use std::fmt;
use std::time::Duration;

/// 关节速度（米每秒 / 弧度每秒）
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointVelocities(pub(crate) JointState);

impl JointVelocities {
    /// 创建零关节的空速度状态
    pub fn new(name: impl Into<String>) -> Self {
        JointVelocities(JointState::typed(
            StateKind::JointVelocities,
            name,
            Vec::new(),
        ))
    }

    /// 创建 `n` 个关节的速度状态，关节名自动生成，仍为 empty
    pub fn with_joint_count(name: impl Into<String>, joint_count: usize) -> Self {
        JointVelocities(JointState::typed(
            StateKind::JointVelocities,
            name,
            auto_joint_names(joint_count),
        ))
    }

    /// 创建速度状态并显式给定关节名列表，仍为 empty
    pub fn with_joint_names(name: impl Into<String>, joint_names: Vec<String>) -> Self {
        JointVelocities(JointState::typed(StateKind::JointVelocities, name, joint_names))
    }

    /// 由数值向量构造，关节名按向量长度自动生成
    pub fn from_values(name: impl Into<String>, values: DVector<f64>) -> Self {
        let mut inner = JointState::typed(
            StateKind::JointVelocities,
            name,
            auto_joint_names(values.len()),
        );
        inner.velocities = values;
        inner.state.set_filled();
        JointVelocities(inner)
    }

    /// 由关节名列表和数值向量构造，长度必须一致
    pub fn with_names_and_values(
        name: impl Into<String>,
        joint_names: Vec<String>,
        values: DVector<f64>,
    ) -> Result<Self> {
        let mut inner = JointState::typed(StateKind::JointVelocities, name, joint_names);
        inner.set_velocities(values)?;
        Ok(JointVelocities(inner))
    }

    /// 由族根状态重解释构造（复制全部槽位，改写种类标签）
    pub fn from_joint_state(state: &JointState) -> Self {
        JointVelocities(state.retagged(StateKind::JointVelocities))
    }

    /// 由位置构造：位置除以 1 秒的单位时间约定
    ///
    /// 数值原样进入速度槽位；全部四个槽位被复制，empty 标志保留。
    pub fn from_positions(positions: &JointPositions) -> Self {
        let mut inner = positions.0.retagged(StateKind::JointVelocities);
        inner.velocities = positions.0.positions.clone();
        JointVelocities(inner)
    }

    /// 速度 × 时间步 → 位移：`positions = velocities * dt`
    ///
    /// `dt` 按秒折算为标量乘数。这是运动学阶次之间唯一的显式转换。
    pub fn integrate(&self, dt: Duration) -> Result<JointPositions> {
        self.0.assert_not_empty()?;
        let mut out = self.0.retagged(StateKind::JointPositions);
        out.positions = &self.0.velocities * dt.as_secs_f64();
        Ok(JointPositions(out))
    }

    /// 速度向量的拷贝（与内部存储无别名）
    pub fn values(&self) -> Result<DVector<f64>> {
        self.0.assert_not_empty()?;
        Ok(self.0.velocities.clone())
    }

    /// 赋值速度向量（初始化路径，清除 empty）
    pub fn set_values(&mut self, values: DVector<f64>) -> Result<()> {
        self.0.set_velocities(values)
    }

    /// 逐元素加法，返回新值
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.velocities += &other.0.velocities;
        Ok(out)
    }

    /// 与原始向量逐元素加法，返回新值
    pub fn try_add_values(&self, values: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        let mut out = self.clone();
        out.0.velocities += values;
        Ok(out)
    }

    /// 原地逐元素加法
    pub fn try_add_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.velocities += &other.0.velocities;
        Ok(())
    }

    /// 原地与原始向量逐元素加法
    pub fn try_add_values_assign(&mut self, values: &DVector<f64>) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        self.0.velocities += values;
        Ok(())
    }

    /// 逐元素减法，返回新值
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.velocities -= &other.0.velocities;
        Ok(out)
    }

    /// 与原始向量逐元素减法，返回新值
    pub fn try_sub_values(&self, values: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        let mut out = self.clone();
        out.0.velocities -= values;
        Ok(out)
    }

    /// 原地逐元素减法
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.velocities -= &other.0.velocities;
        Ok(())
    }

    /// 原地与原始向量逐元素减法
    pub fn try_sub_values_assign(&mut self, values: &DVector<f64>) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        self.0.velocities -= values;
        Ok(())
    }

    /// 标量缩放，返回新值
    pub fn scale(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        let mut out = self.clone();
        out.0.velocities *= lambda;
        Ok(out)
    }

    /// 原地标量缩放
    pub fn scale_assign(&mut self, lambda: f64) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.velocities *= lambda;
        Ok(())
    }

    /// 逐关节独立增益（Hadamard 积），返回新值
    pub fn apply_gains(&self, gains: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(gains.len())?;
        let mut out = self.clone();
        out.0.velocities = out.0.velocities.component_mul(gains);
        Ok(out)
    }

    /// 标量除法；除数为零返回
    /// [`DivisionByZero`](crate::StateError::DivisionByZero)
    pub fn try_div(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        JointState::assert_nonzero_scalar(lambda)?;
        let mut out = self.clone();
        out.0.velocities /= lambda;
        Ok(out)
    }

    /// 逐关节增益除法；任何零分量都返回
    /// [`DivisionByZero`](crate::StateError::DivisionByZero)
    pub fn try_div_gains(&self, gains: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(gains.len())?;
        JointState::assert_nonzero_gains(gains)?;
        let mut out = self.clone();
        out.0.velocities = out.0.velocities.component_div(gains);
        Ok(out)
    }

    /// 所属实体名称
    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// 修改所属实体名称
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.0.set_name(name);
    }

    /// 有序关节名列表
    #[inline]
    pub fn joint_names(&self) -> &[String] {
        self.0.joint_names()
    }

    /// 关节数
    #[inline]
    pub fn num_joints(&self) -> usize {
        self.0.num_joints()
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

    /// 兼容性判定：名称相等且关节名序列逐项相等
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.0.is_compatible(&other.0)
    }

    /// 族根状态视图
    #[inline]
    pub fn as_joint_state(&self) -> &JointState {
        &self.0
    }

    /// 消耗自身转为族根状态
    pub fn into_joint_state(self) -> JointState {
        self.0
    }
}

impl fmt::Display for JointVelocities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.state)?;
        writeln!(f, "joint names: [{}]", self.0.joint_names.join(", "))?;
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, "velocities: [{}]", format_values(&self.0.velocities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;

    fn velocities(values: Vec<f64>) -> JointVelocities {
        JointVelocities::with_names_and_values(
            "robot",
            vec!["j0".to_string(), "j1".to_string()],
            DVector::from_vec(values),
        )
        .unwrap()
    }

    /// 测试位置→速度的单位时间约定：数值原样复制
    #[test]
    fn test_from_positions_copies_values() {
        let p = JointPositions::with_names_and_values(
            "robot",
            vec!["j0".to_string(), "j1".to_string()],
            DVector::from_vec(vec![1.0, 2.0]),
        )
        .unwrap();
        let v = JointVelocities::from_positions(&p);
        assert_eq!(v.values().unwrap(), DVector::from_vec(vec![1.0, 2.0]));
        assert_eq!(v.joint_names(), p.joint_names());
    }

    /// 测试 empty 位置转换得到 empty 速度（重解释保留标志）
    #[test]
    fn test_from_positions_preserves_empty() {
        let p = JointPositions::with_joint_count("robot", 2);
        let v = JointVelocities::from_positions(&p);
        assert!(v.is_empty());
        assert!(matches!(v.values(), Err(StateError::EmptyState { .. })));
    }

    /// 测试 500ms 积分得到半程位移
    #[test]
    fn test_integrate_half_second() {
        let v = velocities(vec![1.0, 2.0]);
        let p = v.integrate(Duration::from_millis(500)).unwrap();
        assert_eq!(p.values().unwrap(), DVector::from_vec(vec![0.5, 1.0]));
        assert_eq!(p.joint_names(), v.joint_names());
    }

    /// 测试 1s 积分还原 from_positions 的原始向量
    #[test]
    fn test_unit_time_roundtrip() {
        let p = JointPositions::from_values("robot", DVector::from_vec(vec![0.3, -0.7, 1.2]));
        let v = JointVelocities::from_positions(&p);
        let back = v.integrate(Duration::from_secs(1)).unwrap();
        assert_eq!(back.values().unwrap(), p.values().unwrap());
    }

    /// 测试反向操作数形式与 integrate 一致
    #[test]
    fn test_from_velocities_matches_integrate() {
        let v = velocities(vec![2.0, 4.0]);
        let dt = Duration::from_millis(250);
        let a = v.integrate(dt).unwrap();
        let b = JointPositions::from_velocities(&v, dt).unwrap();
        assert_eq!(a.values().unwrap(), b.values().unwrap());
    }

    /// 测试加法交换律与减法还原
    #[test]
    fn test_add_commutes_and_sub_inverts() {
        let v1 = velocities(vec![1.0, -2.0]);
        let v2 = velocities(vec![0.5, 3.0]);
        let a = v1.try_add(&v2).unwrap();
        let b = v2.try_add(&v1).unwrap();
        assert_eq!(a.values().unwrap(), b.values().unwrap());

        let back = a.try_sub(&v2).unwrap();
        let diff = back.values().unwrap() - v1.values().unwrap();
        assert!(diff.amax() < 1e-12);
    }

    /// 测试 empty 速度不可积分
    #[test]
    fn test_integrate_empty_rejected() {
        let v = JointVelocities::with_joint_count("robot", 2);
        assert!(matches!(
            v.integrate(Duration::from_secs(1)),
            Err(StateError::EmptyState { .. })
        ));
    }
}
