//! 空间状态
//!
//! [`SpatialState`] 在 [`State`] 之上增加参考系标识。两个空间状态
//! 兼容当且仅当实体名称和参考系都相等；该判定对称且自反。
//!
//! # 参考系是标签，不是变换
//!
//! [`SpatialState::set_reference_frame`] 只重贴标签，绝不对数值载荷
//! 做坐标变换。需要变换的调用方必须在外部自行完成。

use crate::state::{State, StateKind};
use std::fmt;

/// 默认的根参考系名称
pub const DEFAULT_REFERENCE_FRAME: &str = "world";

/// 带参考系的状态身份
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialState {
    state: State,
    reference_frame: String,
}

impl SpatialState {
    /// 创建空间状态，参考系默认为 [`DEFAULT_REFERENCE_FRAME`]
    pub fn new(kind: StateKind, name: impl Into<String>) -> Self {
        Self::with_reference_frame(kind, name, DEFAULT_REFERENCE_FRAME)
    }

    /// 创建空间状态并指定参考系
    pub fn with_reference_frame(
        kind: StateKind,
        name: impl Into<String>,
        reference_frame: impl Into<String>,
    ) -> Self {
        SpatialState {
            state: State::new(kind, name),
            reference_frame: reference_frame.into(),
        }
    }

    /// 参考系名称
    #[inline]
    pub fn reference_frame(&self) -> &str {
        &self.reference_frame
    }

    /// 重设参考系
    ///
    /// 纯标签重贴，对存储的数值无任何副作用。
    pub fn set_reference_frame(&mut self, reference_frame: impl Into<String>) {
        self.reference_frame = reference_frame.into();
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

    #[inline]
    pub(crate) fn set_filled(&mut self) {
        self.state.set_filled();
    }

    /// 显式重置为 empty
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// 以新种类复制身份，保留名称、参考系与 empty 标志
    pub(crate) fn with_kind(&self, kind: StateKind) -> Self {
        SpatialState {
            state: self.state.with_kind(kind),
            reference_frame: self.reference_frame.clone(),
        }
    }

    /// 兼容性判定：名称与参考系都相等
    ///
    /// 对称且自反；不同实体之间不传递。
    pub fn is_compatible(&self, other: &SpatialState) -> bool {
        self.state.is_compatible(&other.state) && self.reference_frame == other.reference_frame
    }
}

impl fmt::Display for SpatialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} expressed in frame \"{}\"",
            self.state, self.reference_frame
        )
    }
}
