// crates/vt_foundation/src/constants.rs

//! 全局物理常量
//!
//! 所有常量均为编译期 `const`，无可变全局状态。

/// 圆周率（双精度）
pub const PI: f64 = std::f64::consts::PI;

/// 2π
pub const TWO_PI: f64 = 2.0 * PI;

/// 判断半径是否落在涡轴上的阈值
///
/// 小于该值的 r 视为 r = 0，避免 1/r 项的除零。
pub const AXIS_EPSILON: f64 = f64::MIN_POSITIVE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pi_matches_std() {
        assert_eq!(PI, 3.141_592_653_589_793);
        assert_eq!(TWO_PI, 2.0 * std::f64::consts::PI);
    }
}
