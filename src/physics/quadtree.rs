use eframe::egui::{Rect, Vec2, pos2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: u32 = 12;

/// Square region of layout space and the aggregate of the points inside it.
pub(super) struct Cell {
    pub(super) region: Rect,
    pub(super) centroid: Vec2,
    pub(super) weight: f32,
    /// Point indices; only leaves keep them.
    pub(super) members: Vec<usize>,
    pub(super) quads: [Option<Box<Cell>>; 4],
}

fn square_around(positions: &[Vec2]) -> Option<Rect> {
    if positions.is_empty() || positions.iter().any(|position| !position.is_finite()) {
        return None;
    }

    let mut extent = Rect::NOTHING;
    for position in positions {
        extent.extend_with(position.to_pos2());
    }
    let side = extent.size().max_elem().max(1.0) + 2.0;
    Some(Rect::from_center_size(extent.center(), Vec2::splat(side)))
}

/// Bit 0 is "right of centre", bit 1 is "below centre".
fn quadrant_of(center: Vec2, position: Vec2) -> usize {
    usize::from(position.x >= center.x) | (usize::from(position.y >= center.y) << 1)
}

fn quadrant_region(region: Rect, quadrant: usize) -> Rect {
    let center = region.center();
    let min = pos2(
        if quadrant & 1 == 0 { region.min.x } else { center.x },
        if quadrant & 2 == 0 { region.min.y } else { center.y },
    );
    Rect::from_min_size(min, region.size() * 0.5)
}

impl Cell {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let region = square_around(positions)?;
        let mut members = (0..positions.len()).collect::<Vec<_>>();
        Some(Self::subdivide(region, &mut members, positions, 0))
    }

    /// Builds the cell for `members`, reordering them so each quadrant is contiguous.
    fn subdivide(region: Rect, members: &mut [usize], positions: &[Vec2], depth: u32) -> Self {
        let weight = members.len() as f32;
        let sum = members
            .iter()
            .fold(Vec2::ZERO, |sum, &index| sum + positions[index]);

        let mut cell = Self {
            region,
            centroid: sum / weight.max(1.0),
            weight,
            members: Vec::new(),
            quads: Default::default(),
        };

        let center = region.center().to_vec2();
        let key = |index: &usize| quadrant_of(center, positions[*index]);
        if depth < MAX_DEPTH && members.len() > LEAF_CAPACITY {
            members.sort_unstable_by_key(key);
        }
        let spread = members.first().map(key) != members.last().map(key);
        if depth >= MAX_DEPTH || members.len() <= LEAF_CAPACITY || !spread {
            cell.members = members.to_vec();
            return cell;
        }

        let mut rest = members;
        for quadrant in 0..4 {
            let count = rest
                .iter()
                .take_while(|&&index| key(&index) == quadrant)
                .count();
            let (inside, tail) = std::mem::take(&mut rest).split_at_mut(count);
            rest = tail;
            if !inside.is_empty() {
                cell.quads[quadrant] = Some(Box::new(Self::subdivide(
                    quadrant_region(region, quadrant),
                    inside,
                    positions,
                    depth + 1,
                )));
            }
        }
        cell
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.quads.iter().all(Option::is_none)
    }

    /// Pushes every member of a leaf that comes within `radius` of `point`.
    /// The result may contain points further away; callers still check distances.
    pub(super) fn gather_within(&self, point: Vec2, radius: f32, out: &mut Vec<usize>) {
        if self.region.distance_sq_to_pos(point.to_pos2()) > radius * radius {
            return;
        }

        if self.is_leaf() {
            out.extend_from_slice(&self.members);
            return;
        }

        for quad in self.quads.iter().flatten() {
            quad.gather_within(point, radius, out);
        }
    }
}
