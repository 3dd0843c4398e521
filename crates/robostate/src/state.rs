//! 状态基础类型
//!
//! [`State`] 是所有状态值的共同身份部分：种类标签、所属实体名称和
//! 初始化标志。它不携带数值载荷；数值向量由关节 / 笛卡尔具体类型持有，
//! 行为通过各类型的方法按种类分派，而不是继承层次。
//!
//! # Empty 语义
//!
//! 新构造的状态是 empty 的，直到第一次显式赋值。empty 状态上的任何
//! 取值或运算都以 [`StateError::EmptyState`](crate::StateError::EmptyState)
//! 失败，绝不静默返回零。

use std::fmt;

/// 状态种类标签
///
/// 在构造时设定一次，之后不可变。替代原型系统中的继承层次：
/// 一个状态值持有区分其物理量种类的枚举。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    /// 仅携带身份的基础状态
    State,
    /// 带参考系的空间状态
    SpatialState,
    /// 关节空间状态（四个并行向量）
    JointState,
    /// 关节位置（米 / 弧度）
    JointPositions,
    /// 关节速度（米每秒 / 弧度每秒）
    JointVelocities,
    /// 关节加速度（…每秒²）
    JointAccelerations,
    /// 关节力矩（牛 / 牛·米）
    JointTorques,
    /// 笛卡尔空间状态（位姿 / 速度旋量 / 力旋量）
    CartesianState,
    /// 笛卡尔位姿（位置 + 姿态四元数）
    CartesianPose,
    /// 笛卡尔速度旋量（线速度 + 角速度）
    CartesianTwist,
    /// 笛卡尔力旋量（力 + 力矩）
    CartesianWrench,
}

impl StateKind {
    /// 种类名称
    pub const fn name(self) -> &'static str {
        match self {
            StateKind::State => "State",
            StateKind::SpatialState => "SpatialState",
            StateKind::JointState => "JointState",
            StateKind::JointPositions => "JointPositions",
            StateKind::JointVelocities => "JointVelocities",
            StateKind::JointAccelerations => "JointAccelerations",
            StateKind::JointTorques => "JointTorques",
            StateKind::CartesianState => "CartesianState",
            StateKind::CartesianPose => "CartesianPose",
            StateKind::CartesianTwist => "CartesianTwist",
            StateKind::CartesianWrench => "CartesianWrench",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 状态身份：种类标签 + 实体名称 + 初始化标志
///
/// 值语义，无共享所有权。跨线程共享时由调用方负责外部同步，
/// 本类型不含任何内部锁。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    kind: StateKind,
    name: String,
    empty: bool,
}

impl State {
    /// 创建新状态，初始为 empty
    pub fn new(kind: StateKind, name: impl Into<String>) -> Self {
        State {
            kind,
            name: name.into(),
            empty: true,
        }
    }

    /// 种类标签（构造后不可变）
    #[inline]
    pub fn kind(&self) -> StateKind {
        self.kind
    }

    /// 所属实体名称
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 修改所属实体名称
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 是否尚未赋值
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// 标记已赋值（首次 set 时由具体类型调用）
    #[inline]
    pub(crate) fn set_filled(&mut self) {
        self.empty = false;
    }

    /// 显式重置为 empty
    ///
    /// 唯一的 false→true 转换；之后所有取值和运算重新开始失败，
    /// 直到下一次赋值。
    pub fn reset(&mut self) {
        self.empty = true;
    }

    /// 以新种类复制身份，保留名称与 empty 标志
    ///
    /// 跨子类型重解释（例如由位置构造速度）使用。
    pub(crate) fn with_kind(&self, kind: StateKind) -> Self {
        State {
            kind,
            name: self.name.clone(),
            empty: self.empty,
        }
    }

    /// 基础兼容性判定：实体名称相等
    pub fn is_compatible(&self, other: &State) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty {
            write!(f, "Empty {} \"{}\"", self.kind, self.name)
        } else {
            write!(f, "{} \"{}\"", self.kind, self.name)
        }
    }
}
