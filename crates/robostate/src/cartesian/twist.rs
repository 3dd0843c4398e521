//! 笛卡尔速度旋量
//!
//! 线速度与角速度槽位的专用视图，6 维排布为 `[vx vy vz wx wy wz]`。
//! 承载笛卡尔侧唯一的显式运动学阶次转换：旋量 × 时间步 → 位姿位移，
//! 角速度经缩放轴角指数映射为姿态四元数。

use crate::cartesian::{
    CartesianPose, CartesianState, assert_nonzero_gains, assert_nonzero_scalar, format_vector3,
    join_vector6, split_vector6,
};
use crate::error::Result;
use crate::state::StateKind;
use nalgebra::{UnitQuaternion, Vector3, Vector6};
use std::fmt;
use std::time::Duration;

/// 笛卡尔速度旋量（线速度 + 角速度）
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartesianTwist(pub(crate) CartesianState);

impl CartesianTwist {
    /// 创建空旋量，参考系默认为 world
    pub fn new(name: impl Into<String>) -> Self {
        CartesianTwist(CartesianState::typed(StateKind::CartesianTwist, name, None))
    }

    /// 创建空旋量并指定参考系
    pub fn with_reference_frame(
        name: impl Into<String>,
        reference_frame: impl Into<String>,
    ) -> Self {
        CartesianTwist(CartesianState::typed(
            StateKind::CartesianTwist,
            name,
            Some(reference_frame.into()),
        ))
    }

    /// 由 6 维向量构造
    pub fn from_values(name: impl Into<String>, values: Vector6<f64>) -> Self {
        let mut twist = Self::new(name);
        twist.set_values(values);
        twist
    }

    /// 由族根状态重解释构造
    pub fn from_cartesian_state(state: &CartesianState) -> Self {
        CartesianTwist(state.retagged(StateKind::CartesianTwist))
    }

    /// 由位姿构造：位姿除以 1 秒的单位时间约定
    ///
    /// 线速度取位置数值，角速度取姿态的缩放轴角；empty 标志保留。
    pub fn from_pose(pose: &CartesianPose) -> Self {
        let mut inner = pose.0.retagged(StateKind::CartesianTwist);
        inner.linear_velocity = pose.0.position;
        inner.angular_velocity = pose.0.orientation.scaled_axis();
        CartesianTwist(inner)
    }

    /// 旋量 × 时间步 → 位姿位移
    ///
    /// `position = v·dt`，`orientation = exp(ω·dt)`。
    pub fn integrate(&self, dt: Duration) -> Result<CartesianPose> {
        self.0.assert_not_empty()?;
        let dt_secs = dt.as_secs_f64();
        let mut out = self.0.retagged(StateKind::CartesianPose);
        out.position = self.0.linear_velocity * dt_secs;
        out.orientation = UnitQuaternion::from_scaled_axis(self.0.angular_velocity * dt_secs);
        Ok(CartesianPose(out))
    }

    /// 旋量向量 `[vx vy vz wx wy wz]` 的拷贝
    pub fn values(&self) -> Result<Vector6<f64>> {
        self.0.assert_not_empty()?;
        Ok(join_vector6(&self.0.linear_velocity, &self.0.angular_velocity))
    }

    /// 赋值旋量向量（初始化路径，清除 empty）
    ///
    /// 维度固定为 6，由类型系统在编译期保证。
    pub fn set_values(&mut self, values: Vector6<f64>) {
        let (linear, angular) = split_vector6(&values);
        self.0.set_linear_velocity(linear);
        self.0.set_angular_velocity(angular);
    }

    /// 线速度
    pub fn linear(&self) -> Result<Vector3<f64>> {
        self.0.linear_velocity()
    }

    /// 角速度
    pub fn angular(&self) -> Result<Vector3<f64>> {
        self.0.angular_velocity()
    }

    /// 逐元素加法，返回新值
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.linear_velocity += other.0.linear_velocity;
        out.0.angular_velocity += other.0.angular_velocity;
        Ok(out)
    }

    /// 与原始 6 维向量逐元素加法，返回新值
    pub fn try_add_values(&self, values: &Vector6<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        let (linear, angular) = split_vector6(values);
        let mut out = self.clone();
        out.0.linear_velocity += linear;
        out.0.angular_velocity += angular;
        Ok(out)
    }

    /// 原地逐元素加法
    pub fn try_add_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.linear_velocity += other.0.linear_velocity;
        self.0.angular_velocity += other.0.angular_velocity;
        Ok(())
    }

    /// 逐元素减法，返回新值
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.0.binary_guard(&other.0)?;
        let mut out = self.clone();
        out.0.linear_velocity -= other.0.linear_velocity;
        out.0.angular_velocity -= other.0.angular_velocity;
        Ok(out)
    }

    /// 与原始 6 维向量逐元素减法，返回新值
    pub fn try_sub_values(&self, values: &Vector6<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        let (linear, angular) = split_vector6(values);
        let mut out = self.clone();
        out.0.linear_velocity -= linear;
        out.0.angular_velocity -= angular;
        Ok(out)
    }

    /// 原地逐元素减法
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<()> {
        self.0.binary_guard(&other.0)?;
        self.0.linear_velocity -= other.0.linear_velocity;
        self.0.angular_velocity -= other.0.angular_velocity;
        Ok(())
    }

    /// 标量缩放，返回新值
    pub fn scale(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        let mut out = self.clone();
        out.0.linear_velocity *= lambda;
        out.0.angular_velocity *= lambda;
        Ok(out)
    }

    /// 原地标量缩放
    pub fn scale_assign(&mut self, lambda: f64) -> Result<()> {
        self.0.assert_not_empty()?;
        self.0.linear_velocity *= lambda;
        self.0.angular_velocity *= lambda;
        Ok(())
    }

    /// 逐分量独立增益（Hadamard 积），返回新值
    pub fn apply_gains(&self, gains: &Vector6<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        let (lg, ag) = split_vector6(gains);
        let mut out = self.clone();
        out.0.linear_velocity = out.0.linear_velocity.component_mul(&lg);
        out.0.angular_velocity = out.0.angular_velocity.component_mul(&ag);
        Ok(out)
    }

    /// 标量除法；除数为零显式失败
    pub fn try_div(&self, lambda: f64) -> Result<Self> {
        self.0.assert_not_empty()?;
        assert_nonzero_scalar(lambda)?;
        let mut out = self.clone();
        out.0.linear_velocity /= lambda;
        out.0.angular_velocity /= lambda;
        Ok(out)
    }

    /// 逐分量增益除法；任何零分量都显式失败
    pub fn try_div_gains(&self, gains: &Vector6<f64>) -> Result<Self> {
        self.0.assert_not_empty()?;
        assert_nonzero_gains(gains)?;
        let (lg, ag) = split_vector6(gains);
        let mut out = self.clone();
        out.0.linear_velocity = out.0.linear_velocity.component_div(&lg);
        out.0.angular_velocity = out.0.angular_velocity.component_div(&ag);
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

impl fmt::Display for CartesianTwist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.spatial)?;
        if self.0.is_empty() {
            return Ok(());
        }
        writeln!(f, "linear velocity: [{}]", format_vector3(&self.0.linear_velocity))?;
        write!(f, "angular velocity: [{}]", format_vector3(&self.0.angular_velocity))
    }
}
