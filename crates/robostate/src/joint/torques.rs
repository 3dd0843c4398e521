//! 关节力矩
//!
//! 力矩槽位的专用视图，单位为牛（平动关节）或牛·米（转动关节）。

use crate::error::Result;
use crate::joint::{JointState, auto_joint_names, format_values};
use crate::state::StateKind;
use nalgebra::DVector;
use std::fmt;

/// 关节力矩（牛 / 牛·米）
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointTorques(pub(crate) JointState);

impl JointTorques {
    /// 创建零关节的空力矩状态
    pub fn new(name: impl Into<String>) -> Self {
        JointTorques(JointState::typed(StateKind::JointTorques, name, Vec::new()))
    }

    /// 创建 `n` 个关节的力矩状态，关节名自动生成，仍为 empty
    pub fn with_joint_count(name: impl Into<String>, joint_count: usize) -> Self {
        JointTorques(JointState::typed(
            StateKind::JointTorques,
            name,
            auto_joint_names(joint_count),
        ))
    }

    /// 创建力矩状态并显式给定关节名列表，仍为 empty
    pub fn with_joint_names(name: impl Into<String>, joint_names: Vec<String>) -> Self {
        JointTorques(JointState::typed(StateKind::JointTorques, name, joint_names))
    }

    /// 由数值向量构造，关节名按向量长度自动生成
    pub fn from_values(name: impl Into<String>, values: DVector<f64>) -> Self {
        let mut inner = JointState::typed(
            StateKind::JointTorques,
            name,
            auto_joint_names(values.len()),
        );
        inner.torques = values;
        inner.state.set_filled();
        JointTorques(inner)
    }

    /// 由关节名列表和数值向量构造，长度必须一致
    pub fn with_names_and_values(
        name: impl Into<String>,
        joint_names: Vec<String>,
        values: DVector<f64>,
    ) -> Result<Self> {
        let mut inner = JointState::typed(StateKind::JointTorques, name, joint_names);
        inner.set_torques(values)?;
        Ok(JointTorques(inner))
    }

    /// 由族根状态重解释构造
    pub fn from_joint_state(state: &JointState) -> Self {
        JointTorques(state.retagged(StateKind::JointTorques))
    }

    /// 力矩向量的拷贝
    pub fn values(&self) -> Result<DVector<f64>> {
        self.0.assert_not_empty()?;
        Ok(self.0.torques.clone())
    }

    /// 赋值力矩向量（初始化路径，清除 empty）
    pub fn set_values(&mut self, values: DVector<f64>) -> Result<()> {
        self.0.set_torques(values)
    }

    /// 逐元素加法，返回新值
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.torques += &other.0.torques;
        Ok(out)
    }

    /// 与原始向量逐元素加法，返回新值
    pub fn try_add_values(&self, values: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        let mut out = self.clone();
        out.0.torques += values;
        Ok(out)
    }

    /// 原地逐元素加法
    pub fn try_add_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.torques += &other.0.torques;
        Ok(())
    }

    /// 原地与原始向量逐元素加法
    pub fn try_add_values_assign(&mut self, values: &DVector<f64>) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        self.0.torques += values;
        Ok(())
    }

    /// 逐元素减法，返回新值
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.torques -= &other.0.torques;
        Ok(out)
    }

    /// 与原始向量逐元素减法，返回新值
    pub fn try_sub_values(&self, values: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        let mut out = self.clone();
        out.0.torques -= values;
        Ok(out)
    }

    /// 原地逐元素减法
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.torques -= &other.0.torques;
        Ok(())
    }

    /// 原地与原始向量逐元素减法
    pub fn try_sub_values_assign(&mut self, values: &DVector<f64>) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(values.len())?;
        self.0.torques -= values;
        Ok(())
    }

    /// 标量缩放，返回新值
    pub fn scale(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        let mut out = self.clone();
        out.0.torques *= lambda;
        Ok(out)
    }

    /// 原地标量缩放
    pub fn scale_assign(&mut self, lambda: f64) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.torques *= lambda;
        Ok(())
    }

    /// 逐关节独立增益（Hadamard 积），返回新值
    pub fn apply_gains(&self, gains: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(gains.len())?;
        let mut out = self.clone();
        out.0.torques = out.0.torques.component_mul(gains);
        Ok(out)
    }

    /// 标量除法；除数为零显式失败
    pub fn try_div(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        JointState::assert_nonzero_scalar(lambda)?;
        let mut out = self.clone();
        out.0.torques /= lambda;
        Ok(out)
    }

    /// 逐关节增益除法；任何零分量都显式失败
    pub fn try_div_gains(&self, gains: &DVector<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        self.0.assert_dimension(gains.len())?;
        JointState::assert_nonzero_gains(gains)?;
        let mut out = self.clone();
        out.0.torques = out.0.torques.component_div(gains);
        Ok(out)
    }

    /// 所属实体名称
    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
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

    /// 兼容性判定
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

impl fmt::Display for JointTorques {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.state)?;
        writeln!(f, "joint names: [{}]", self.0.joint_names.join(", "))?;
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, "torques: [{}]", format_values(&self.0.torques))
    }
}
