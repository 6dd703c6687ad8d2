//! Adaptive-precision predicates.
//!
//! Every predicate first evaluates its determinant in native arithmetic and
//! compares the magnitude against a forward error bound scaled by the
//! permanent (the determinant with every product replaced by its absolute
//! value). Only when that fails does it recompute with exact minors of the
//! rounded coordinate differences, then add a first-order correction from the
//! differences' rounding tails, and finally fall back to exact arithmetic.
//! Well-conditioned inputs never leave the first stage.

use super::{debug_assert_finite, exact};
use crate::IeeeFloat;
use crate::expansion::{
    Expansion, minus_tail, three_prod, two_two_diff, two_two_diff_zero_check,
};
use tracing::trace;

/// Orientation of `pc` relative to the directed line through `pa` and `pb`.
///
/// Positive when counterclockwise, negative when clockwise, zero when
/// collinear. The sign is always exact.
///
/// ```
/// use adaptive_predicates::orient2d;
///
/// assert!(orient2d(&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]) > 0.0);
/// assert_eq!(orient2d(&[0.0, 0.0], &[1.0, 1.0], &[3.0, 3.0]), 0.0);
/// ```
pub fn orient2d<T: IeeeFloat>(pa: &[T; 2], pb: &[T; 2], pc: &[T; 2]) -> T {
    debug_assert_finite(&[pa.as_slice(), pb.as_slice(), pc.as_slice()]);
    let bounds = &T::BOUNDS;
    let zero = T::zero();

    let acx = pa[0] - pc[0];
    let bcx = pb[0] - pc[0];
    let acy = pa[1] - pc[1];
    let bcy = pb[1] - pc[1];
    let detleft = acx * bcy;
    let detright = acy * bcx;
    let det = detleft - detright;

    // Opposite signs or a zero product cannot cancel.
    if detleft.is_sign_negative() != detright.is_sign_negative()
        || detleft == zero
        || detright == zero
    {
        return det;
    }

    let detsum = (detleft + detright).abs();
    if det.abs() >= bounds.ccw_a * detsum {
        return det;
    }

    let b = two_two_diff(acx, acy, bcx, bcy);
    let mut det = b.estimate();
    if det.abs() >= bounds.ccw_b * detsum {
        return det;
    }

    let acxtail = minus_tail(pa[0], pc[0], acx);
    let bcxtail = minus_tail(pb[0], pc[0], bcx);
    let acytail = minus_tail(pa[1], pc[1], acy);
    let bcytail = minus_tail(pb[1], pc[1], bcy);
    if [acxtail, bcxtail, acytail, bcytail].iter().all(|&t| t == zero) {
        return det;
    }

    let errbound = bounds.ccw_c * detsum + bounds.result * det.abs();
    det += (acx * bcytail + bcy * acxtail) - (acy * bcxtail + bcx * acytail);
    if det.abs() >= errbound {
        return det;
    }

    trace!(
        predicate = "orient2d",
        stage = "tail_correction",
        "tail correction inconclusive, completing expansion"
    );
    let c1: Expansion<T, 8> = b.sum(&two_two_diff(acxtail, acytail, bcx, bcy));
    let c2: Expansion<T, 12> = c1.sum(&two_two_diff(acx, acy, bcxtail, bcytail));
    let d: Expansion<T, 16> = c2.sum(&two_two_diff(acxtail, acytail, bcxtail, bcytail));
    d.most_significant()
}

/// Orientation of `pd` relative to the plane through `pa`, `pb` and `pc`.
///
/// Positive when `pd` lies below the plane, where `pa`, `pb`, `pc` appear
/// counterclockwise from above. Zero when coplanar.
pub fn orient3d<T: IeeeFloat>(pa: &[T; 3], pb: &[T; 3], pc: &[T; 3], pd: &[T; 3]) -> T {
    debug_assert_finite(&[pa.as_slice(), pb.as_slice(), pc.as_slice(), pd.as_slice()]);
    let bounds = &T::BOUNDS;
    let zero = T::zero();

    let adx = pa[0] - pd[0];
    let bdx = pb[0] - pd[0];
    let cdx = pc[0] - pd[0];
    let ady = pa[1] - pd[1];
    let bdy = pb[1] - pd[1];
    let cdy = pc[1] - pd[1];
    let adz = pa[2] - pd[2];
    let bdz = pb[2] - pd[2];
    let cdz = pc[2] - pd[2];

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;

    let det = adz * (bdxcdy - cdxbdy) + bdz * (cdxady - adxcdy) + cdz * (adxbdy - bdxady);
    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * adz.abs()
        + (cdxady.abs() + adxcdy.abs()) * bdz.abs()
        + (adxbdy.abs() + bdxady.abs()) * cdz.abs();
    if det.abs() >= bounds.o3d_a * permanent {
        return det;
    }

    let bc = two_two_diff(bdx, bdy, cdx, cdy);
    let ca = two_two_diff(cdx, cdy, adx, ady);
    let ab = two_two_diff(adx, ady, bdx, bdy);
    let fin1: Expansion<T, 16> = bc.scale::<8>(adz).sum(&ca.scale::<8>(bdz));
    let fin1: Expansion<T, 24> = fin1.sum(&ab.scale::<8>(cdz));
    let mut det = fin1.estimate();
    if det.abs() >= bounds.o3d_b * permanent {
        return det;
    }

    let adxtail = minus_tail(pa[0], pd[0], adx);
    let bdxtail = minus_tail(pb[0], pd[0], bdx);
    let cdxtail = minus_tail(pc[0], pd[0], cdx);
    let adytail = minus_tail(pa[1], pd[1], ady);
    let bdytail = minus_tail(pb[1], pd[1], bdy);
    let cdytail = minus_tail(pc[1], pd[1], cdy);
    let adztail = minus_tail(pa[2], pd[2], adz);
    let bdztail = minus_tail(pb[2], pd[2], bdz);
    let cdztail = minus_tail(pc[2], pd[2], cdz);
    let tails = [
        adxtail, adytail, adztail, bdxtail, bdytail, bdztail, cdxtail, cdytail, cdztail,
    ];
    if tails.iter().all(|&t| t == zero) {
        return det;
    }

    let errbound = bounds.o3d_c * permanent + bounds.result * det.abs();
    det += (adz * ((bdx * cdytail + cdy * bdxtail) - (bdy * cdxtail + cdx * bdytail))
        + adztail * (bdx * cdy - bdy * cdx))
        + (bdz * ((cdx * adytail + ady * cdxtail) - (cdy * adxtail + adx * cdytail))
            + bdztail * (cdx * ady - cdy * adx))
        + (cdz * ((adx * bdytail + bdy * adxtail) - (ady * bdxtail + bdx * adytail))
            + cdztail * (adx * bdy - ady * bdx));
    if det.abs() >= errbound {
        return det;
    }

    trace!(
        predicate = "orient3d",
        stage = "tail_correction",
        "tail correction inconclusive, completing expansion"
    );
    let bct: Expansion<T, 8> = two_two_diff_zero_check(bdxtail, bdytail, cdx, cdy)
        .sum(&two_two_diff_zero_check(cdytail, cdxtail, bdy, bdx));
    let cat: Expansion<T, 8> = two_two_diff_zero_check(cdxtail, cdytail, adx, ady)
        .sum(&two_two_diff_zero_check(adytail, adxtail, cdy, cdx));
    let abt: Expansion<T, 8> = two_two_diff_zero_check(adxtail, adytail, bdx, bdy)
        .sum(&two_two_diff_zero_check(bdytail, bdxtail, ady, adx));

    let mut fin2 = Expansion::<T, 192>::zero();
    fin2 += &fin1;
    fin2 += &bct.scale::<16>(adz);
    fin2 += &cat.scale::<16>(bdz);
    fin2 += &abt.scale::<16>(cdz);
    fin2 += &bc.scale::<8>(adztail);
    fin2 += &ca.scale::<8>(bdztail);
    fin2 += &ab.scale::<8>(cdztail);
    let tail_products = [
        three_prod(adxtail, bdytail, cdz),
        three_prod(adxtail, bdytail, cdztail),
        three_prod(-adxtail, cdytail, bdz),
        three_prod(-adxtail, cdytail, bdztail),
        three_prod(bdxtail, cdytail, adz),
        three_prod(bdxtail, cdytail, adztail),
        three_prod(-bdxtail, adytail, cdz),
        three_prod(-bdxtail, adytail, cdztail),
        three_prod(cdxtail, adytail, bdz),
        three_prod(cdxtail, adytail, bdztail),
        three_prod(-cdxtail, bdytail, adz),
        three_prod(-cdxtail, bdytail, adztail),
    ];
    for term in &tail_products {
        fin2 += term;
    }
    fin2 += &bct.scale::<16>(adztail);
    fin2 += &cat.scale::<16>(bdztail);
    fin2 += &abt.scale::<16>(cdztail);
    fin2.most_significant()
}

/// Whether `pd` lies inside the circle through `pa`, `pb` and `pc`.
///
/// Positive inside, negative outside, zero on the circle, assuming `pa`,
/// `pb`, `pc` are counterclockwise; the sign flips otherwise.
pub fn incircle<T: IeeeFloat>(pa: &[T; 2], pb: &[T; 2], pc: &[T; 2], pd: &[T; 2]) -> T {
    debug_assert_finite(&[pa.as_slice(), pb.as_slice(), pc.as_slice(), pd.as_slice()]);
    let bounds = &T::BOUNDS;
    let zero = T::zero();
    let two = T::one() + T::one();

    let adx = pa[0] - pd[0];
    let bdx = pb[0] - pd[0];
    let cdx = pc[0] - pd[0];
    let ady = pa[1] - pd[1];
    let bdy = pb[1] - pd[1];
    let cdy = pc[1] - pd[1];

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);
    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;
    if det.abs() >= bounds.icc_a * permanent {
        return det;
    }

    let bc = two_two_diff(bdx, bdy, cdx, cdy);
    let ca = two_two_diff(cdx, cdy, adx, ady);
    let ab = two_two_diff(adx, ady, bdx, bdy);
    let adet = lifted_minor(&bc, adx, ady);
    let bdet = lifted_minor(&ca, bdx, bdy);
    let cdet = lifted_minor(&ab, cdx, cdy);
    let fin1: Expansion<T, 64> = adet.sum(&bdet);
    let fin1: Expansion<T, 96> = fin1.sum(&cdet);
    let mut det = fin1.estimate();
    if det.abs() >= bounds.icc_b * permanent {
        return det;
    }

    let adxtail = minus_tail(pa[0], pd[0], adx);
    let adytail = minus_tail(pa[1], pd[1], ady);
    let bdxtail = minus_tail(pb[0], pd[0], bdx);
    let bdytail = minus_tail(pb[1], pd[1], bdy);
    let cdxtail = minus_tail(pc[0], pd[0], cdx);
    let cdytail = minus_tail(pc[1], pd[1], cdy);
    let tails = [adxtail, bdxtail, cdxtail, adytail, bdytail, cdytail];
    if tails.iter().all(|&t| t == zero) {
        return det;
    }

    let errbound = bounds.icc_c * permanent + bounds.result * det.abs();
    det += ((adx * adx + ady * ady)
        * ((bdx * cdytail + cdy * bdxtail) - (bdy * cdxtail + cdx * bdytail))
        + (bdx * cdy - bdy * cdx) * (adx * adxtail + ady * adytail) * two)
        + ((bdx * bdx + bdy * bdy)
            * ((cdx * adytail + ady * cdxtail) - (cdy * adxtail + adx * cdytail))
            + (cdx * ady - cdy * adx) * (bdx * bdxtail + bdy * bdytail) * two)
        + ((cdx * cdx + cdy * cdy)
            * ((adx * bdytail + bdy * adxtail) - (ady * bdxtail + bdx * adytail))
            + (adx * bdy - ady * bdx) * (cdx * cdxtail + cdy * cdytail) * two);
    if det.abs() >= errbound {
        return det;
    }

    trace!(
        predicate = "incircle",
        stage = "tail_correction",
        "tail correction inconclusive, falling back to exact"
    );
    exact::incircle(pa, pb, pc, pd)
}

/// Whether `pe` lies inside the sphere through `pa`, `pb`, `pc` and `pd`.
///
/// Positive inside, negative outside, zero on the sphere, assuming the first
/// four points are positively oriented; the sign flips otherwise.
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
    let bounds = &T::BOUNDS;
    let zero = T::zero();
    let two = T::one() + T::one();

    let aex = pa[0] - pe[0];
    let bex = pb[0] - pe[0];
    let cex = pc[0] - pe[0];
    let dex = pd[0] - pe[0];
    let aey = pa[1] - pe[1];
    let bey = pb[1] - pe[1];
    let cey = pc[1] - pe[1];
    let dey = pd[1] - pe[1];
    let aez = pa[2] - pe[2];
    let bez = pb[2] - pe[2];
    let cez = pc[2] - pe[2];
    let dez = pd[2] - pe[2];

    let permanent = {
        let aexbey = aex * bey;
        let bexaey = bex * aey;
        let bexcey = bex * cey;
        let cexbey = cex * bey;
        let cexdey = cex * dey;
        let dexcey = dex * cey;
        let dexaey = dex * aey;
        let aexdey = aex * dey;
        let aexcey = aex * cey;
        let cexaey = cex * aey;
        let bexdey = bex * dey;
        let dexbey = dex * bey;

        let ab = aexbey - bexaey;
        let bc = bexcey - cexbey;
        let cd = cexdey - dexcey;
        let da = dexaey - aexdey;
        let ac = aexcey - cexaey;
        let bd = bexdey - dexbey;
        let abc = aez * bc - bez * ac + cez * ab;
        let bcd = bez * cd - cez * bd + dez * bc;
        let cda = cez * da + dez * ac + aez * cd;
        let dab = dez * ab + aez * bd + bez * da;

        let alift = aex * aex + aey * aey + aez * aez;
        let blift = bex * bex + bey * bey + bez * bez;
        let clift = cex * cex + cey * cey + cez * cez;
        let dlift = dex * dex + dey * dey + dez * dez;
        let det = (dlift * abc - clift * dab) + (blift * cda - alift * bcd);

        let (aezp, bezp, cezp, dezp) = (aez.abs(), bez.abs(), cez.abs(), dez.abs());
        let ab_p = aexbey.abs() + bexaey.abs();
        let bc_p = bexcey.abs() + cexbey.abs();
        let cd_p = cexdey.abs() + dexcey.abs();
        let da_p = dexaey.abs() + aexdey.abs();
        let ac_p = aexcey.abs() + cexaey.abs();
        let bd_p = bexdey.abs() + dexbey.abs();
        let permanent = (cd_p * bezp + bd_p * cezp + bc_p * dezp) * alift
            + (da_p * cezp + ac_p * dezp + cd_p * aezp) * blift
            + (ab_p * dezp + bd_p * aezp + da_p * bezp) * clift
            + (bc_p * aezp + ac_p * bezp + ab_p * cezp) * dlift;
        if det.abs() >= bounds.isp_a * permanent {
            return det;
        }
        permanent
    };

    let ab = two_two_diff(aex, bex, aey, bey);
    let bc = two_two_diff(bex, cex, bey, cey);
    let cd = two_two_diff(cex, dex, cey, dey);
    let da = two_two_diff(dex, aex, dey, aey);
    let ac = two_two_diff(aex, cex, aey, cey);
    let bd = two_two_diff(bex, dex, bey, dey);

    let temp24a = exact::scaled_sum3(&bc, dez, &cd, bez, &bd, -cez);
    let temp24b = exact::scaled_sum3(&cd, aez, &da, cez, &ac, dez);
    let temp24c = exact::scaled_sum3(&da, bez, &ab, dez, &bd, aez);
    let temp24d = exact::scaled_sum3(&ab, cez, &bc, aez, &ac, -bez);
    let adet = lifted_cofactor(&temp24a, aex, aey, aez, true);
    let bdet = lifted_cofactor(&temp24b, bex, bey, bez, false);
    let cdet = lifted_cofactor(&temp24c, cex, cey, cez, true);
    let ddet = lifted_cofactor(&temp24d, dex, dey, dez, false);
    let abdet: Expansion<T, 576> = adet.sum(&bdet);
    let cddet: Expansion<T, 576> = cdet.sum(&ddet);
    let fin1: Expansion<T, 1152> = abdet.sum(&cddet);
    let mut det = fin1.estimate();
    if det.abs() >= bounds.isp_b * permanent {
        return det;
    }

    let aextail = minus_tail(pa[0], pe[0], aex);
    let aeytail = minus_tail(pa[1], pe[1], aey);
    let aeztail = minus_tail(pa[2], pe[2], aez);
    let bextail = minus_tail(pb[0], pe[0], bex);
    let beytail = minus_tail(pb[1], pe[1], bey);
    let beztail = minus_tail(pb[2], pe[2], bez);
    let cextail = minus_tail(pc[0], pe[0], cex);
    let ceytail = minus_tail(pc[1], pe[1], cey);
    let ceztail = minus_tail(pc[2], pe[2], cez);
    let dextail = minus_tail(pd[0], pe[0], dex);
    let deytail = minus_tail(pd[1], pe[1], dey);
    let deztail = minus_tail(pd[2], pe[2], dez);
    let tails = [
        aextail, aeytail, aeztail, bextail, beytail, beztail, cextail, ceytail, ceztail,
        dextail, deytail, deztail,
    ];
    if tails.iter().all(|&t| t == zero) {
        return det;
    }

    let errbound = bounds.isp_c * permanent + bounds.result * det.abs();
    let abeps = (aex * beytail + bey * aextail) - (aey * bextail + bex * aeytail);
    let bceps = (bex * ceytail + cey * bextail) - (bey * cextail + cex * beytail);
    let cdeps = (cex * deytail + dey * cextail) - (cey * dextail + dex * ceytail);
    let daeps = (dex * aeytail + aey * dextail) - (dey * aextail + aex * deytail);
    let aceps = (aex * ceytail + cey * aextail) - (aey * cextail + cex * aeytail);
    let bdeps = (bex * deytail + dey * bextail) - (bey * dextail + dex * beytail);
    let ab3 = ab.most_significant();
    let bc3 = bc.most_significant();
    let cd3 = cd.most_significant();
    let da3 = da.most_significant();
    let ac3 = ac.most_significant();
    let bd3 = bd.most_significant();

    let alift = aex * aex + aey * aey + aez * aez;
    let blift = bex * bex + bey * bey + bez * bez;
    let clift = cex * cex + cey * cey + cez * cez;
    let dlift = dex * dex + dey * dey + dez * dez;
    let first_order = (blift
        * ((cez * daeps + dez * aceps + aez * cdeps) + (ceztail * da3 + deztail * ac3 + aeztail * cd3))
        + dlift
            * ((aez * bceps - bez * aceps + cez * abeps)
                + (aeztail * bc3 - beztail * ac3 + ceztail * ab3)))
        - (alift
            * ((bez * cdeps - cez * bdeps + dez * bceps)
                + (beztail * cd3 - ceztail * bd3 + deztail * bc3))
            + clift
                * ((dez * abeps + aez * bdeps + bez * daeps)
                    + (deztail * ab3 + aeztail * bd3 + beztail * da3)));
    let lift_tails = ((bex * bextail + bey * beytail + bez * beztail)
        * (cez * da3 + dez * ac3 + aez * cd3)
        + (dex * dextail + dey * deytail + dez * deztail) * (aez * bc3 - bez * ac3 + cez * ab3))
        - ((aex * aextail + aey * aeytail + aez * aeztail) * (bez * cd3 - cez * bd3 + dez * bc3)
            + (cex * cextail + cey * ceytail + cez * ceztail)
                * (dez * ab3 + aez * bd3 + bez * da3));
    det += first_order + two * lift_tails;
    if det.abs() >= errbound {
        return det;
    }

    trace!(
        predicate = "insphere",
        stage = "tail_correction",
        "tail correction inconclusive, falling back to exact"
    );
    exact::insphere(pa, pb, pc, pd, pe)
}

/// `minor · (x² + y²)`.
fn lifted_minor<T: IeeeFloat>(minor: &Expansion<T, 4>, x: T, y: T) -> Expansion<T, 32> {
    let xx: Expansion<T, 16> = minor.scale::<8>(x).scale(x);
    let yy: Expansion<T, 16> = minor.scale::<8>(y).scale(y);
    xx.sum(&yy)
}

/// `cofactor · (x² + y² + z²)`, negated when `negate` is set.
fn lifted_cofactor<T: IeeeFloat>(
    cofactor: &Expansion<T, 24>,
    x: T,
    y: T,
    z: T,
    negate: bool,
) -> Expansion<T, 288> {
    let outer = |v: T| if negate { -v } else { v };
    let xx: Expansion<T, 96> = cofactor.scale::<48>(x).scale(outer(x));
    let yy: Expansion<T, 96> = cofactor.scale::<48>(y).scale(outer(y));
    let zz: Expansion<T, 96> = cofactor.scale::<48>(z).scale(outer(z));
    let xy: Expansion<T, 192> = xx.sum(&yy);
    xy.sum(&zz)
}
