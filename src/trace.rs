use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{HandError, HandResult};
use crate::features::{Contour, ContourLink, ContourSet, Iv2};
use crate::im::Lum8Im;

/// How many border pixels to keep per contour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainApprox {
    /// Every border pixel.
    None,
    /// Only the end points of horizontal, vertical and diagonal runs.
    #[default]
    Simple,
}

/// Label image used while tracing: padded by one background pixel on every side.
struct LabelIm {
    w: usize,
    h: usize,
    arr: Vec<i32>,
}

impl LabelIm {
    fn from_lum8_padded(src: &Lum8Im) -> Self {
        let w = src.w + 2;
        let h = src.h + 2;
        let mut arr = vec![0_i32; w * h];
        for y in 0..src.h {
            for x in 0..src.w {
                let v = unsafe { *src.get_unchecked(x, y, 0) };
                arr[(y + 1) * w + (x + 1)] = if v == 0 { 0 } else { 1 };
            }
        }
        Self { w, h, arr }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
}

// 8-neighborhood LUTs.
const DIR_TO_DELT_CW: [(i32, i32); 8] = [
    ( 0,  1), // 0
    ( 1,  1), // 1
    ( 1,  0), // 2
    ( 1, -1), // 3
    ( 0, -1), // 4
    (-1, -1), // 5
    (-1,  0), // 6
    (-1,  1), // 7
];

const DELT_PLUS_1_TO_DIR_CW: [i32; 9] = [
    // dy = -1, dx = -1,0,1
    5, 6, 7,
    // dy =  0, dx = -1,0,1 (0 impossible)
    4, -1, 0,
    // dy =  1, dx = -1,0,1
    3, 2, 1,
];

const DIR_TO_DELT_CCW: [(i32, i32); 8] = [
    ( 0,  1), // 0
    (-1,  1), // 1
    (-1,  0), // 2
    (-1, -1), // 3
    ( 0, -1), // 4
    ( 1, -1), // 5
    ( 1,  0), // 6
    ( 1,  1), // 7
];

const DELT_PLUS_1_TO_DIR_CCW: [i32; 9] = [
    // dy = -1
    3, 2, 1,
    // dy = 0
    4, -1, 0,
    // dy = 1
    5, 6, 7,
];

#[inline]
fn delt_to_dir_cw(dy: i32, dx: i32) -> i32 {
    DELT_PLUS_1_TO_DIR_CW[((dy + 1) * 3 + (dx + 1)) as usize]
}

#[inline]
fn delt_to_dir_ccw(dy: i32, dx: i32) -> i32 {
    DELT_PLUS_1_TO_DIR_CCW[((dy + 1) * 3 + (dx + 1)) as usize]
}

/// Suzuki–Abe border following over a binary image (nonzero = foreground).
///
/// The image behaves as if framed by background, so regions touching the edge still close.
/// Returned points are in source image coordinates, without repeating the first point.
/// `hierarchy[i]` describes `contours[i]`.
pub fn find_contours(src: &Lum8Im, approx: ChainApprox) -> HandResult<ContourSet> {
    if src.is_empty() {
        return Err(HandError::geometry(format!(
            "cannot trace contours in an empty {}x{} image",
            src.w, src.h
        )));
    }
    if !src.is_consistent() {
        return Err(HandError::geometry(format!(
            "image buffer of {} elements does not cover {}x{} (stride {})",
            src.arr.len(),
            src.w,
            src.h,
            src.s
        )));
    }

    let mut im = LabelIm::from_lum8_padded(src);
    let w1 = im.w - 1;
    let h1 = im.h - 1;

    let mut contours: Vec<Contour> = Vec::new();
    let mut hierarchy: Vec<ContourLink> = Vec::new();
    let mut id_to_index: HashMap<i32, usize> = HashMap::new();

    let mut curr_id: i32 = 1;

    // (0) raster scan
    for y0 in 1..h1 {
        let mut last_id: i32 = 1;

        for x0 in 1..w1 {
            let f0 = im.arr[im.idx(x0, y0)];
            // ((2)) in the paper.
            let (y2, x2, is_hole) = if f0 == 1 && im.arr[im.idx(x0 - 1, y0)] == 0 {
                // (1a) outer border start
                (y0 as i32, x0 as i32 - 1, false)
            } else if f0 >= 1 && im.arr[im.idx(x0 + 1, y0)] == 0 {
                // (1b) hole border start
                if f0 > 1 {
                    last_id = f0;
                }
                (y0 as i32, x0 as i32 + 1, true)
            } else {
                // (1c)
                if f0 != 0 && f0 != 1 {
                    last_id = f0.abs();
                }
                continue;
            };

            curr_id = curr_id
                .checked_add(1)
                .ok_or_else(|| HandError::geometry("too many borders to label"))?;

            // (2) decide parent using Table 1
            let new_index = contours.len();
            let parent = id_to_index.get(&last_id).and_then(|&last_idx| {
                let last = hierarchy[last_idx];
                match (last.is_hole, is_hole) {
                    // hole inside hole, contour next to contour
                    (true, true) | (false, false) => last.parent,
                    // contour inside hole, hole inside contour
                    _ => Some(last_idx),
                }
            });
            contours.push(Contour::default());
            hierarchy.push(ContourLink { parent, is_hole });
            id_to_index.insert(curr_id, new_index);

            let points = follow_border(&mut im, x0, y0, x2, y2, curr_id)?;
            contours[new_index].points = match approx {
                ChainApprox::None => points,
                ChainApprox::Simple => compress_runs(points),
            };

            // (4) update last_id
            let f = im.arr[im.idx(x0, y0)];
            if f != 0 && f != 1 {
                last_id = f.abs();
            }
        }
    }

    Ok(ContourSet { contours, hierarchy })
}

/// Steps (3.1) .. (3.5): follow one border starting at `(x0, y0)` with ((2)) at `(x2, y2)`,
/// labelling it with `id`. Returns the border in source (unpadded) coordinates.
fn follow_border(
    im: &mut LabelIm,
    x0: usize,
    y0: usize,
    x2: i32,
    y2: i32,
    id: i32,
) -> HandResult<Vec<Iv2>> {
    let unpad = |x: i32, y: i32| Iv2::new(x - 1, y - 1);

    // (3.1) find ((1)) by clockwise search around ((0)) starting from ((2))
    let dir0 = delt_to_dir_cw(y2 - y0 as i32, x2 - x0 as i32);
    debug_assert!((0..8).contains(&dir0));

    let mut first = None;
    for d in 0..8 {
        let (ddy, ddx) = DIR_TO_DELT_CW[((dir0 + d) % 8) as usize];
        let ny = y0 as i32 + ddy;
        let nx = x0 as i32 + ddx;
        if im.arr[im.idx(nx as usize, ny as usize)] != 0 {
            first = Some((ny, nx));
            break;
        }
    }

    let Some((y1, x1)) = first else {
        // singleton pixel
        let i0 = im.idx(x0, y0);
        im.arr[i0] = -id;
        return Ok(vec![unpad(x0 as i32, y0 as i32)]);
    };

    // (3.2) ((2))=((1)); ((3))=((0))
    let (mut y2, mut x2) = (y1, x1);
    let (mut y3, mut x3) = (y0 as i32, x0 as i32);
    let mut points = Vec::new();

    loop {
        points.push(unpad(x3, y3));

        // (3.3) counter-clockwise search for ((4)), starting from the element after ((2))
        let dir0 = delt_to_dir_ccw(y2 - y3, x2 - x3);
        debug_assert!((0..8).contains(&dir0));

        let mut east_was_examined = false;
        let mut next = None;
        for d in 0..8 {
            let (ddy, ddx) = DIR_TO_DELT_CCW[((dir0 + d + 1) % 8) as usize];
            if ddy == 0 && ddx == 1 {
                east_was_examined = true;
            }
            let ny = y3 + ddy;
            let nx = x3 + ddx;
            if im.arr[im.idx(nx as usize, ny as usize)] != 0 {
                next = Some((ny, nx));
                break;
            }
        }
        let (y4, x4) = next.ok_or_else(|| {
            HandError::geometry(format!("border following lost the border at ({x3}, {y3})"))
        })?;

        // (3.4a/3.4b) label f((3))
        let idx3 = im.idx(x3 as usize, y3 as usize);
        if east_was_examined && im.arr[im.idx(x3 as usize + 1, y3 as usize)] == 0 {
            im.arr[idx3] = -id;
        } else if im.arr[idx3] == 1 {
            im.arr[idx3] = id;
        }

        // (3.5) termination check: ((4))==((0)) and ((3))==((1))
        if y4 == y0 as i32 && x4 == x0 as i32 && y3 == y1 && x3 == x1 {
            break;
        }

        // advance: ((2))=((3)), ((3))=((4))
        y2 = y3;
        x2 = x3;
        y3 = y4;
        x3 = x4;
    }

    Ok(points)
}

/// Drop every point that continues the chain direction of its predecessor, treating the
/// border as closed.
fn compress_runs(points: Vec<Iv2>) -> Vec<Iv2> {
    let n = points.len();
    if n < 3 {
        return points;
    }

    let step = |a: Iv2, b: Iv2| ((b.x - a.x).signum(), (b.y - a.y).signum());
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect()
}
