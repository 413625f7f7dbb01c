//! 3D simplex noise.
//!
//! CPU twin of `snoise3` in `shaders/wave.wgsl`: the classic Ashima Arts
//! simplex noise (0.6 kernel radius, 42.0 output scale). Both versions run the
//! same f32 operations in the same order so the CPU mirror predicts what the
//! GPU displaces.
//!
//! Output is roughly [-1, 1]; the observed peak is a little above 1.0.

use glam::{Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

/// Sample 3D simplex noise at `(x, y, z)`
pub fn noise3(x: f32, y: f32, z: f32) -> f32 {
    simplex3(Vec3::new(x, y, z))
}

/// Sample 3D simplex noise at a point
#[allow(clippy::excessive_precision)]
pub fn simplex3(v: Vec3) -> f32 {
    const C: [f32; 2] = [1.0 / 6.0, 1.0 / 3.0];
    const D: Vec4 = Vec4::new(0.0, 0.5, 1.0, 2.0);

    // First corner
    let i = (v + v.dot(Vec3::splat(C[1]))).floor();
    let x0 = v - i + i.dot(Vec3::splat(C[0]));

    // Other corners
    let g = step3(x0.yzx(), x0);
    let l = Vec3::ONE - g;
    let i1 = g.min(l.zxy());
    let i2 = g.max(l.zxy());

    let x1 = x0 - i1 + Vec3::splat(C[0]);
    let x2 = x0 - i2 + Vec3::splat(C[1]);
    let x3 = x0 - Vec3::splat(D.y);

    // Permutations
    let i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients: 7x7 points over a square, mapped onto an octahedron
    let n_ = 0.142857142857_f32; // 1/7
    let ns = n_ * D.wyz() - D.xzx();

    let j = p - 49.0 * (p * ns.z * ns.z).floor();

    let x_ = (j * ns.z).floor();
    let y_ = (j - 7.0 * x_).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);

    let s0 = b0.floor() * 2.0 + Vec4::ONE;
    let s1 = b1.floor() * 2.0 + Vec4::ONE;
    let sh = -step4(h, Vec4::ZERO);

    let a0 = b0.xzyw() + s0.xzyw() * sh.xxyy();
    let a1 = b1.xzyw() + s1.xzyw() * sh.zzww();

    let p0 = Vec3::new(a0.x, a0.y, h.x);
    let p1 = Vec3::new(a0.z, a0.w, h.y);
    let p2 = Vec3::new(a1.x, a1.y, h.z);
    let p3 = Vec3::new(a1.z, a1.w, h.w);

    // Normalise gradients
    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    let p0 = p0 * norm.x;
    let p1 = p1 * norm.y;
    let p2 = p2 * norm.z;
    let p3 = p3 * norm.w;

    // Mix final noise value
    let m = (Vec4::splat(0.6) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;
    42.0 * (m * m).dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: Vec4) -> Vec4 {
    mod289_4(((x * 34.0) + Vec4::ONE) * x)
}

#[allow(clippy::excessive_precision)]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.79284291400159) - 0.85373472095314 * r
}

/// GLSL `step`: 0.0 where `x < edge`, 1.0 otherwise
fn step3(edge: Vec3, x: Vec3) -> Vec3 {
    Vec3::select(x.cmplt(edge), Vec3::ZERO, Vec3::ONE)
}

fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmplt(edge), Vec4::ZERO, Vec4::ONE)
}
