/// Machine epsilon for f32, used as the near-zero threshold for lengths and denominators.
pub const EPSILON: f32 = 1.192_093e-7;

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
