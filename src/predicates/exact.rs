//! Predicates evaluated entirely in expansion arithmetic.
//!
//! The determinant is expanded by cofactors over exact 2×2 minors of the raw
//! coordinates; nothing is rounded until the most significant component is
//! read off. These are always correct and always slow, so the adaptive
//! variants only call them when every cheaper stage failed to certify.

use super::debug_assert_finite;
use crate::IeeeFloat;
use crate::expansion::{Expansion, two_two_diff};

/// Exact minor `p.x·q.y − q.x·p.y`.
#[inline]
fn cross<T: IeeeFloat>(p: &[T], q: &[T]) -> Expansion<T, 4> {
    two_two_diff(p[0], q[0], p[1], q[1])
}

/// `x·xs + (y·ys + z·zs)` for three minors.
#[inline]
pub(super) fn scaled_sum3<T: IeeeFloat>(
    x: &Expansion<T, 4>,
    xs: T,
    y: &Expansion<T, 4>,
    ys: T,
    z: &Expansion<T, 4>,
    zs: T,
) -> Expansion<T, 24> {
    let tail: Expansion<T, 16> = y.scale::<8>(ys).sum(&z.scale::<8>(zs));
    x.scale::<8>(xs).sum(&tail)
}

/// Orientation of `pc` relative to the directed line through `pa` and `pb`.
///
/// Positive when the points are in counterclockwise order, negative when
/// clockwise, zero when collinear.
pub fn orient2d<T: IeeeFloat>(pa: &[T; 2], pb: &[T; 2], pc: &[T; 2]) -> T {
    debug_assert_finite(&[pa.as_slice(), pb.as_slice(), pc.as_slice()]);

    let aterms = two_two_diff(pa[0], pa[0], pc[1], pb[1]);
    let bterms = two_two_diff(pb[0], pb[0], pa[1], pc[1]);
    let cterms = two_two_diff(pc[0], pc[0], pb[1], pa[1]);

    let partial: Expansion<T, 8> = aterms.sum(&bterms);
    let det: Expansion<T, 12> = partial.sum(&cterms);
    det.most_significant()
}

/// Orientation of `pd` relative to the plane through `pa`, `pb` and `pc`.
///
/// Positive when `pd` lies below the plane, where "below" means `pa`, `pb`
/// and `pc` appear counterclockwise when viewed from above. Zero when the
/// four points are coplanar.
pub fn orient3d<T: IeeeFloat>(pa: &[T; 3], pb: &[T; 3], pc: &[T; 3], pd: &[T; 3]) -> T {
    debug_assert_finite(&[pa.as_slice(), pb.as_slice(), pc.as_slice(), pd.as_slice()]);

    let [abc, bcd, cda, dab] = planar_cofactors(&pa[..], &pb[..], &pc[..], &pd[..]);

    let adet: Expansion<T, 24> = bcd.scale(pa[2]);
    let bdet: Expansion<T, 24> = cda.scale(-pb[2]);
    let cdet: Expansion<T, 24> = dab.scale(pc[2]);
    let ddet: Expansion<T, 24> = abc.scale(-pd[2]);

    let abdet: Expansion<T, 48> = adet.sum(&bdet);
    let cddet: Expansion<T, 48> = cdet.sum(&ddet);
    let det: Expansion<T, 96> = abdet.sum(&cddet);
    det.most_significant()
}

/// Whether `pd` lies inside the circle through `pa`, `pb` and `pc`.
///
/// With `pa`, `pb`, `pc` in counterclockwise order the result is positive
/// inside, negative outside and zero on the circle; the sign flips for
/// clockwise order.
pub fn incircle<T: IeeeFloat>(pa: &[T; 2], pb: &[T; 2], pc: &[T; 2], pd: &[T; 2]) -> T {
    debug_assert_finite(&[pa.as_slice(), pb.as_slice(), pc.as_slice(), pd.as_slice()]);

    let [abc, bcd, cda, dab] = planar_cofactors(&pa[..], &pb[..], &pc[..], &pd[..]);

    let adet = lifted_cofactor(&bcd, pa, false);
    let bdet = lifted_cofactor(&cda, pb, true);
    let cdet = lifted_cofactor(&dab, pc, false);
    let ddet = lifted_cofactor(&abc, pd, true);

    let abdet: Expansion<T, 192> = adet.sum(&bdet);
    let cddet: Expansion<T, 192> = cdet.sum(&ddet);
    let det: Expansion<T, 384> = abdet.sum(&cddet);
    det.most_significant()
}

/// Whether `pe` lies inside the sphere through `pa`, `pb`, `pc` and `pd`.
///
/// With the first four points positively oriented (`orient3d > 0`) the
/// result is positive inside, negative outside and zero on the sphere.
pub fn insphere<T: IeeeFloat>(
    pa: &[T; 3],
    pb: &[T; 3],
    pc: &[T; 3],
    pd: &[T; 3],
    pe: &[T; 3],
) -> T {
    debug_assert_finite(&[
        pa.as_slice(),
        pb.as_slice(),
        pc.as_slice(),
        pd.as_slice(),
        pe.as_slice(),
    ]);

    let [bcde, cdea, deab, eabc, abcd] = spatial_cofactors(pa, pb, pc, pd, pe);

    let adet = lifted_spatial_cofactor(&bcde, pa);
    let bdet = lifted_spatial_cofactor(&cdea, pb);
    let cdet = lifted_spatial_cofactor(&deab, pc);
    let ddet = lifted_spatial_cofactor(&eabc, pd);
    let edet = lifted_spatial_cofactor(&abcd, pe);

    let abdet: Expansion<T, 2304> = adet.sum(&bdet);
    let cddet: Expansion<T, 2304> = cdet.sum(&ddet);
    let cdedet: Expansion<T, 3456> = cddet.sum(&edet);
    let det: Expansion<T, 5760> = abdet.sum(&cdedet);
    det.most_significant()
}

/// The four 3×3 cofactors `[abc, bcd, cda, dab]` built from the xy-minors of
/// four points.
fn planar_cofactors<T: IeeeFloat>(
    pa: &[T],
    pb: &[T],
    pc: &[T],
    pd: &[T],
) -> [Expansion<T, 12>; 4] {
    let ab = cross(pa, pb);
    let bc = cross(pb, pc);
    let cd = cross(pc, pd);
    let da = cross(pd, pa);
    let ac = cross(pa, pc);
    let bd = cross(pb, pd);

    let abc: Expansion<T, 8> = ab.sum(&bc);
    let bcd: Expansion<T, 8> = bc.sum(&cd);
    let cda: Expansion<T, 8> = cd.sum(&da);
    let dab: Expansion<T, 8> = da.sum(&ab);
    [
        abc.difference(&ac),
        bcd.difference(&bd),
        cda.sum(&ac),
        dab.sum(&bd),
    ]
}

/// `minor · (x² + y²)`, negated when `negate` is set.
fn lifted_cofactor<T: IeeeFloat>(
    minor: &Expansion<T, 12>,
    p: &[T; 2],
    negate: bool,
) -> Expansion<T, 96> {
    let outer = |v: T| if negate { -v } else { v };
    let x: Expansion<T, 48> = minor.scale::<24>(p[0]).scale(outer(p[0]));
    let y: Expansion<T, 48> = minor.scale::<24>(p[1]).scale(outer(p[1]));
    x.sum(&y)
}

/// The five 4×4 cofactors `[bcde, cdea, deab, eabc, abcd]` of the lifted
/// in-sphere matrix.
fn spatial_cofactors<T: IeeeFloat>(
    pa: &[T; 3],
    pb: &[T; 3],
    pc: &[T; 3],
    pd: &[T; 3],
    pe: &[T; 3],
) -> [Expansion<T, 96>; 5] {
    let ab = cross(pa, pb);
    let bc = cross(pb, pc);
    let cd = cross(pc, pd);
    let de = cross(pd, pe);
    let ea = cross(pe, pa);
    let ac = cross(pa, pc);
    let bd = cross(pb, pd);
    let ce = cross(pc, pe);
    let da = cross(pd, pa);
    let eb = cross(pe, pb);

    let (az, bz, cz, dz, ez) = (pa[2], pb[2], pc[2], pd[2], pe[2]);
    let abc = scaled_sum3(&bc, az, &ac, -bz, &ab, cz);
    let bcd = scaled_sum3(&cd, bz, &bd, -cz, &bc, dz);
    let cde = scaled_sum3(&de, cz, &ce, -dz, &cd, ez);
    let dea = scaled_sum3(&ea, dz, &da, -ez, &de, az);
    let eab = scaled_sum3(&ab, ez, &eb, -az, &ea, bz);
    let abd = scaled_sum3(&bd, az, &da, bz, &ab, dz);
    let bce = scaled_sum3(&ce, bz, &eb, cz, &bc, ez);
    let cda = scaled_sum3(&da, cz, &ac, dz, &cd, az);
    let deb = scaled_sum3(&eb, dz, &bd, ez, &de, bz);
    let eac = scaled_sum3(&ac, ez, &ce, az, &ea, cz);

    let combine = |w: &Expansion<T, 24>,
                   x: &Expansion<T, 24>,
                   y: &Expansion<T, 24>,
                   z: &Expansion<T, 24>|
     -> Expansion<T, 96> {
        let plus: Expansion<T, 48> = w.sum(x);
        let minus: Expansion<T, 48> = y.sum(z);
        plus.difference(&minus)
    };

    [
        combine(&cde, &bce, &deb, &bcd),
        combine(&dea, &cda, &eac, &cde),
        combine(&eab, &deb, &abd, &dea),
        combine(&abc, &eac, &bce, &eab),
        combine(&bcd, &abd, &cda, &abc),
    ]
}

/// `cofactor · (x² + y² + z²)`.
fn lifted_spatial_cofactor<T: IeeeFloat>(
    cofactor: &Expansion<T, 96>,
    p: &[T; 3],
) -> Expansion<T, 1152> {
    let x: Expansion<T, 384> = cofactor.scale::<192>(p[0]).scale(p[0]);
    let y: Expansion<T, 384> = cofactor.scale::<192>(p[1]).scale(p[1]);
    let z: Expansion<T, 384> = cofactor.scale::<192>(p[2]).scale(p[2]);
    let xy: Expansion<T, 768> = x.sum(&y);
    xy.sum(&z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orient2d_signs() {
        assert!(orient2d(&[0.0_f64, 0.0], &[1.0, 0.0], &[1.0, 1.0]) > 0.0);
        assert!(orient2d(&[0.0_f64, 0.0], &[1.0, 1.0], &[1.0, 0.0]) < 0.0);
        assert_eq!(orient2d(&[0.0_f64, 0.0], &[1.0, 0.0], &[2.0, 0.0]), 0.0);
    }

    #[test]
    fn orient2d_value_is_exact_for_small_integers() {
        // Exact determinant 2 * area = 6; the expansion collapses to one term.
        assert_eq!(orient2d(&[0.0_f64, 0.0], &[3.0, 0.0], &[0.0, 2.0]), 6.0);
    }

    #[test]
    fn orient3d_signs() {
        let a = [0.0_f64, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        let c = [0.0, 1.0, 0.0];
        assert!(orient3d(&a, &b, &c, &[0.0, 0.0, -1.0]) > 0.0);
        assert!(orient3d(&a, &b, &c, &[0.0, 0.0, 1.0]) < 0.0);
        assert_eq!(orient3d(&a, &b, &c, &[0.3, 0.7, 0.0]), 0.0);
    }

    #[test]
    fn incircle_signs() {
        let a = [0.0_f64, 0.0];
        let b = [1.0, 0.0];
        let c = [0.0, 1.0];
        assert!(incircle(&a, &b, &c, &[0.25, 0.25]) > 0.0);
        assert!(incircle(&a, &b, &c, &[2.0, 2.0]) < 0.0);
        assert_eq!(incircle(&a, &b, &c, &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn insphere_signs() {
        let a = [1.0_f64, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0];
        let c = [0.0, 0.0, 1.0];
        let d = [-1.0, 0.0, 0.0];
        let sign = orient3d(&a, &b, &c, &d).signum();
        assert!(sign * insphere(&a, &b, &c, &d, &[0.0, 0.0, 0.0]) > 0.0);
        assert!(sign * insphere(&a, &b, &c, &d, &[3.0, 3.0, 3.0]) < 0.0);
        assert_eq!(insphere(&a, &b, &c, &d, &[0.0, -1.0, 0.0]), 0.0);
    }
}
