//! 关节位置
//!
//! 对 [`JointState`] 位置槽位的专用视图。所有算术只作用于位置向量；
//! 二元运算前统一检查 empty / 兼容性 / 维度，失败不修改接收者。
//!
//! # 示例
//!
//! ```rust
//! use nalgebra::DVector;
//! use robostate::JointPositions;
//!
//! let p = JointPositions::from_values("robot", DVector::from_vec(vec![0.1, 0.2]));
//! let doubled = p.scale(2.0)?;
//! assert_eq!(doubled.values()?, DVector::from_vec(vec![0.2, 0.4]));
//! # Ok::<(), robostate::StateError>(())
//! ```

use crate::error::Result;
use crate::joint::{JointState, JointVelocities, auto_joint_names, format_values};
use crate::state::StateKind;
use nalgebra::DVector;
use std::fmt;
use std::time::Duration;

/// 关节位置（米 / 弧度）
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointPositions(pub(crate) JointState);

impl JointPositions {
    /// 创建零关节的空位置状态
    pub fn new(name: impl Into<String>) -> Self {
        JointPositions(JointState::typed(
            StateKind::JointPositions,
            name,
            Vec::new(),
        ))
    }

    /// 创建 `n` 个关节的位置状态，关节名自动生成，仍为 empty
    pub fn with_joint_count(name: impl Into<String>, joint_count: usize) -> Self {
        JointPositions(JointState::typed(
            StateKind::JointPositions,
            name,
            auto_joint_names(joint_count),
        ))
    }

    /// 创建位置状态并显式给定关节名列表，仍为 empty
    pub fn with_joint_names(name: impl Into<String>, joint_names: Vec<String>) -> Self {
        JointPositions(JointState::typed(StateKind::JointPositions, name, joint_names))
    }

    /// 由数值向量构造，关节名按向量长度自动生成
    pub fn from_values(name: impl Into<String>, values: DVector<f64>) -> Self {
        let mut inner =
            JointState::typed(StateKind::JointPositions, name, auto_joint_names(values.len()));
        inner.positions = values;
        inner.state.set_filled();
        JointPositions(inner)
    }

    /// 由关节名列表和数值向量构造
    ///
    /// 向量长度必须等于关节名个数，否则返回
    /// [`DimensionMismatch`](crate::StateError::DimensionMismatch)。
    pub fn with_names_and_values(
        name: impl Into<String>,
        joint_names: Vec<String>,
        values: DVector<f64>,
    ) -> Result<Self> {
        let mut inner = JointState::typed(StateKind::JointPositions, name, joint_names);
        inner.set_positions(values)?;
        Ok(JointPositions(inner))
    }

    /// 由族根状态重解释构造（复制全部槽位，改写种类标签）
    pub fn from_joint_state(state: &JointState) -> Self {
        JointPositions(state.retagged(StateKind::JointPositions))
    }

    /// 由速度乘以时间步构造位移：`positions = velocities * dt`
    ///
    /// [`JointVelocities::integrate`] 的反向操作数形式。
    pub fn from_velocities(velocities: &JointVelocities, dt: Duration) -> Result<Self> {
        velocities.integrate(dt)
    }

    /// 位置向量的拷贝（与内部存储无别名）
    pub fn values(&self) -> Result<DVector<f64>> {
        self.0.assert_not_empty()?;
        Ok(self.0.positions.clone())
    }

    /// 赋值位置向量（初始化路径，清除 empty）
    pub fn set_values(&mut self, values: DVector<f64>) -> Result<()> {
        self.0.set_positions(values)
    }

    /// 逐元素加法，返回新值
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.positions += &other.0.positions;
        Ok(out)
    }

    /// 与原始向量逐元素加法，返回新值
    pub fn try_add_values(&self, values: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        let mut out = self.clone();
        out.0.positions += values;
        Ok(out)
    }

    /// 原地逐元素加法
    pub fn try_add_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.positions += &other.0.positions;
        Ok(())
    }

    /// 原地与原始向量逐元素加法
    pub fn try_add_values_assign(&mut self, values: &DVector<f64>) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        self.0.positions += values;
        Ok(())
    }

    /// 逐元素减法，返回新值
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.positions -= &other.0.positions;
        Ok(out)
    }

    /// 与原始向量逐元素减法，返回新值
    pub fn try_sub_values(&self, values: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        let mut out = self.clone();
        out.0.positions -= values;
        Ok(out)
    }

    /// 原地逐元素减法
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.positions -= &other.0.positions;
        Ok(())
    }

    /// 原地与原始向量逐元素减法
    pub fn try_sub_values_assign(&mut self, values: &DVector<f64>) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        self.0.positions -= values;
        Ok(())
    }

    /// 标量缩放，返回新值
    pub fn scale(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        let mut out = self.clone();
        out.0.positions *= lambda;
        Ok(out)
    }

    /// 原地标量缩放
    pub fn scale_assign(&mut self, lambda: f64) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.positions *= lambda;
        Ok(())
    }

    /// 逐关节独立增益（Hadamard 积），返回新值
    pub fn apply_gains(&self, gains: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(gains.len())?;
        let mut out = self.clone();
        out.0.positions = out.0.positions.component_mul(gains);
        Ok(out)
    }

    /// 标量除法；除数为零返回
    /// [`DivisionByZero`](crate::StateError::DivisionByZero)
    pub fn try_div(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        JointState::assert_nonzero_scalar(lambda)?;
        let mut out = self.clone();
        out.0.positions /= lambda;
        Ok(out)
    }

    /// 逐关节增益除法；任何零分量都返回
    /// [`DivisionByZero`](crate::StateError::DivisionByZero)
    pub fn try_div_gains(&self, gains: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(gains.len())?;
        JointState::assert_nonzero_gains(gains)?;
        let mut out = self.clone();
        out.0.positions = out.0.positions.component_div(gains);
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

    /// 族根状态视图（身份元数据 + 全部槽位）
    #[inline]
    pub fn as_joint_state(&self) -> &JointState {
        &self.0
    }

    /// 消耗自身转为族根状态
    pub fn into_joint_state(self) -> JointState {
        self.0
    }
}

impl fmt::Display for JointPositions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.state)?;
        writeln!(f, "joint names: [{}]", self.0.joint_names.join(", "))?;
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, "positions: [{}]", format_values(&self.0.positions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;

    fn positions(values: Vec<f64>) -> JointPositions {
        JointPositions::with_names_and_values(
            "robot",
            vec!["j0".to_string(), "j1".to_string()],
            DVector::from_vec(values),
        )
        .unwrap()
    }

    /// 测试长度与关节名个数不一致的构造被拒绝
    #[test]
    fn test_constructor_dimension_mismatch() {
        let err = JointPositions::with_names_and_values(
            "robot",
            vec!["j0".to_string(), "j1".to_string()],
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

    /// 测试非变异加法：p + [0.1, 0.1] 返回新值，p 不变
    #[test]
    fn test_add_values_is_non_mutating() {
        let p = positions(vec![1.0, 2.0]);
        let p2 = p.try_add_values(&DVector::from_vec(vec![0.1, 0.1])).unwrap();
        assert_eq!(p2.values().unwrap(), DVector::from_vec(vec![1.1, 2.1]));
        assert_eq!(p.values().unwrap(), DVector::from_vec(vec![1.0, 2.0]));
    }

    /// 测试原地加法保持非 empty
    #[test]
    fn test_add_assign() {
        let mut p = positions(vec![1.0, 2.0]);
        let q = positions(vec![0.5, 0.5]);
        p.try_add_assign(&q).unwrap();
        assert_eq!(p.values().unwrap(), DVector::from_vec(vec![1.5, 2.5]));
        assert!(!p.is_empty());
    }

    /// 测试 empty 状态上的运算全部失败
    #[test]
    fn test_empty_state_rejected() {
        let empty = JointPositions::with_joint_count("robot", 2);
        assert!(matches!(
            empty.values(),
            Err(StateError::EmptyState { .. })
        ));
        assert!(matches!(
            empty.scale(2.0),
            Err(StateError::EmptyState { .. })
        ));
        let p = positions(vec![1.0, 2.0]);
        assert!(matches!(
            p.try_add(&empty),
            Err(StateError::EmptyState { .. })
        ));
    }

    /// 测试不同关节名序列的运算被拒绝
    #[test]
    fn test_incompatible_joint_names() {
        let p = positions(vec![1.0, 2.0]);
        let q = JointPositions::with_names_and_values(
            "robot",
            vec!["j1".to_string(), "j0".to_string()],
            DVector::from_vec(vec![1.0, 2.0]),
        )
        .unwrap();
        assert!(matches!(
            p.try_add(&q),
            Err(StateError::IncompatibleStates { .. })
        ));
    }

    /// 测试除零策略
    #[test]
    fn test_division_by_zero() {
        let p = positions(vec![1.0, 2.0]);
        assert_eq!(p.try_div(0.0).unwrap_err(), StateError::DivisionByZero);
        let gains = DVector::from_vec(vec![2.0, 0.0]);
        assert_eq!(
            p.try_div_gains(&gains).unwrap_err(),
            StateError::DivisionByZero
        );
        // 失败不修改接收者
        assert_eq!(p.values().unwrap(), DVector::from_vec(vec![1.0, 2.0]));
    }

    /// 测试逐关节增益与其除法互为逆
    #[test]
    fn test_gains_roundtrip() {
        let p = positions(vec![1.0, 2.0]);
        let gains = DVector::from_vec(vec![2.0, 4.0]);
        let scaled = p.apply_gains(&gains).unwrap();
        assert_eq!(scaled.values().unwrap(), DVector::from_vec(vec![2.0, 8.0]));
        let back = scaled.try_div_gains(&gains).unwrap();
        assert_eq!(back.values().unwrap(), p.values().unwrap());
    }

    /// 测试 Display 渲染名称、关节名和数值
    #[test]
    fn test_display() {
        let p = positions(vec![1.0, 2.0]);
        let text = format!("{}", p);
        assert!(text.contains("JointPositions \"robot\""));
        assert!(text.contains("joint names: [j0, j1]"));
        assert!(text.contains("positions: [1.0000, 2.0000]"));
    }
}
