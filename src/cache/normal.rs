use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Unit normal in octahedral form: two 16-bit unorm components packed into a `u32`,
/// x in the low half and y in the high half.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct PackedNormal(pub u32);

impl Default for PackedNormal {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PackedNormal {
    /// Encoding of +Z, used for triangles without a usable normal.
    pub const DEFAULT: Self = Self(0x8000_8000);

    pub fn encode(n: Vec3) -> Self {
        let n = n / (n.x.abs() + n.y.abs() + n.z.abs());
        let mut p = Vec2::new(n.x, n.y);
        if n.z < 0.0 {
            p = (Vec2::ONE - Vec2::new(p.y, p.x).abs()) * sign(p);
        }
        let u = ((p * 0.5 + 0.5).clamp(Vec2::ZERO, Vec2::ONE) * 65535.0).round();
        Self(u.x as u32 | (u.y as u32) << 16)
    }

    pub fn decode(self) -> Vec3 {
        let u = Vec2::new((self.0 & 0xffff) as f32, (self.0 >> 16) as f32);
        let f = u / 65535.0 * 2.0 - 1.0;
        let mut n = Vec3::new(f.x, f.y, 1.0 - f.x.abs() - f.y.abs());
        let t = (-n.z).max(0.0);
        n.x += if n.x >= 0.0 { -t } else { t };
        n.y += if n.y >= 0.0 { -t } else { t };
        n.normalize()
    }
}

/// Component sign with zero counted as positive.
fn sign(v: Vec2) -> Vec2 {
    Vec2::new(
        if v.x >= 0.0 { 1.0 } else { -1.0 },
        if v.y >= 0.0 { 1.0 } else { -1.0 },
    )
}
