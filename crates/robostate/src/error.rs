//! 错误类型体系
//!
//! 状态代数的不变量违规分为四类，全部同步抛出、不可由本层恢复：
//! 调用方（控制器 / 传输层）决定记录、中止还是替换默认值。
//!
//! # 强异常安全
//!
//! 所有检查在任何修改之前完成：一次失败的原地运算绝不会部分更新
//! 内部向量，接收者保持失败前的状态。
//!
//! # 示例
//!
//! ```rust
//! use robostate::{JointPositions, StateError};
//!
//! let p = JointPositions::new("robot");
//! match p.values() {
//!     Err(StateError::EmptyState { name }) => assert_eq!(name, "robot"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror::Error;

/// 状态操作错误
///
/// 区分"对未初始化状态的操作"与"两个不兼容状态之间的操作"，
/// 以及维度不一致和退化除法。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// 对未初始化（empty）状态执行取值或运算
    #[error("State '{name}' is empty: no value has been assigned yet")]
    EmptyState {
        /// 状态所属实体名称
        name: String,
    },

    /// 二元运算的两个操作数不兼容
    ///
    /// 名称不一致、参考系不一致（空间状态），或关节名序列不一致
    /// （关节状态，顺序敏感：索引按位置对应）。
    #[error("Incompatible states '{lhs}' and '{rhs}': {reason}")]
    IncompatibleStates {
        /// 左操作数名称
        lhs: String,
        /// 右操作数名称
        rhs: String,
        /// 不兼容原因
        reason: String,
    },

    /// 向量长度与声明的关节数不一致
    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch {
        /// 期望长度（关节数）
        expected: usize,
        /// 实际提供的长度
        actual: usize,
    },

    /// 除以零标量，或增益数组中存在零分量
    ///
    /// 显式失败而不是静默传播 NaN/Inf。
    #[error("Division by zero")]
    DivisionByZero,
}

/// 本 crate 的 Result 别名
pub type Result<T> = std::result::Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::StateError;

    /// 测试各错误变体的 Display 输出
    #[test]
    fn test_error_display() {
        let err = StateError::EmptyState {
            name: "robot".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "State 'robot' is empty: no value has been assigned yet"
        );

        let err = StateError::IncompatibleStates {
            lhs: "a".to_string(),
            rhs: "b".to_string(),
            reason: "entity names differ".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Incompatible states 'a' and 'b': entity names differ"
        );

        let err = StateError::DimensionMismatch {
            expected: 2,
            actual: 1,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 2 values, got 1");

        assert_eq!(StateError::DivisionByZero.to_string(), "Division by zero");
    }
}
