//! Level editor operations
//!
//! Pointer-agnostic: the host translates mouse or touch input into
//! `begin_drag` / `drag_to` / `end_drag` calls in arena coordinates.

use glam::Vec2;

use super::level::{Level, LevelError, Polygon, PolygonKind};

/// Pick distance for vertex handles
pub const HANDLE_RADIUS: f32 = 8.0;

/// What a pointer position landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Vertex { polygon: usize, vertex: usize },
    Polygon { polygon: usize },
}

impl Pick {
    pub fn polygon(&self) -> usize {
        match *self {
            Pick::Vertex { polygon, .. } | Pick::Polygon { polygon } => polygon,
        }
    }
}

#[derive(Debug, Clone)]
struct Drag {
    pick: Pick,
    /// Pointer position at the previous drag update
    last: Vec2,
    /// Vertex minus pointer at grab time
    grab_offset: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    pub level: Level,
    /// Selected polygon index
    pub selected: Option<usize>,
    drag: Option<Drag>,
    /// Unsaved changes since the last export
    pub dirty: bool,
}

impl Editor {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            selected: None,
            drag: None,
            dirty: false,
        }
    }

    /// Add a regular polygon and select it
    pub fn add_polygon(&mut self, kind: PolygonKind, center: Vec2, radius: f32, sides: usize) -> usize {
        self.push(Polygon::regular(kind, center, radius, sides))
    }

    /// Add a polygon from explicit points
    pub fn add_points(&mut self, kind: PolygonKind, points: Vec<Vec2>) -> Result<usize, LevelError> {
        let index = self.level.polygons.len();
        let polygon = Polygon::new(kind, points);
        if polygon.points.len() < 3 {
            return Err(LevelError::TooFewPoints {
                index,
                count: polygon.points.len(),
            });
        }
        if !polygon.is_convex() {
            return Err(LevelError::NotConvex { index });
        }
        Ok(self.push(polygon))
    }

    fn push(&mut self, polygon: Polygon) -> usize {
        log::debug!("Added {:?} polygon with {} points", polygon.kind, polygon.points.len());
        self.level.polygons.push(polygon);
        let index = self.level.polygons.len() - 1;
        self.selected = Some(index);
        self.dirty = true;
        index
    }

    /// Vertex handles win over polygon bodies; later polygons are on top
    pub fn pick(&self, point: Vec2) -> Option<Pick> {
        let polygons = &self.level.polygons;

        let mut best: Option<(f32, Pick)> = None;
        for (polygon, poly) in polygons.iter().enumerate().rev() {
            for (vertex, v) in poly.points.iter().enumerate() {
                let dist = v.distance(point);
                if dist <= HANDLE_RADIUS && best.is_none_or(|(d, _)| dist < d) {
                    best = Some((dist, Pick::Vertex { polygon, vertex }));
                }
            }
        }
        if let Some((_, pick)) = best {
            return Some(pick);
        }

        polygons
            .iter()
            .enumerate()
            .rev()
            .find(|(_, poly)| poly.contains(point))
            .map(|(polygon, _)| Pick::Polygon { polygon })
    }

    /// Start dragging whatever is under the pointer; selects its polygon
    pub fn begin_drag(&mut self, point: Vec2) -> Option<Pick> {
        let pick = self.pick(point);
        self.selected = pick.map(|p| p.polygon());
        self.drag = pick.map(|pick| {
            let grab_offset = match pick {
                Pick::Vertex { polygon, vertex } => self.level.polygons[polygon].points[vertex] - point,
                Pick::Polygon { .. } => Vec2::ZERO,
            };
            Drag {
                pick,
                last: point,
                grab_offset,
            }
        });
        pick
    }

    /// Continue a drag. Returns false if the move was rejected.
    ///
    /// A vertex move that would make its polygon non-convex is refused and
    /// the vertex stays where it was.
    pub fn drag_to(&mut self, point: Vec2) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let Some(polygon) = self.level.polygons.get_mut(drag.pick.polygon()) else {
            self.drag = None;
            return false;
        };

        let accepted = match drag.pick {
            Pick::Polygon { .. } => {
                polygon.translate(point - drag.last);
                true
            }
            Pick::Vertex { vertex, .. } => {
                let previous = polygon.points[vertex];
                polygon.points[vertex] = point + drag.grab_offset;
                if polygon.is_convex() {
                    true
                } else {
                    polygon.points[vertex] = previous;
                    false
                }
            }
        };

        drag.last = point;
        if accepted {
            self.dirty = true;
        }
        accepted
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Remove the selected polygon
    pub fn delete_selected(&mut self) -> Option<Polygon> {
        let index = self.selected.take()?;
        if index >= self.level.polygons.len() {
            return None;
        }
        self.drag = None;
        self.dirty = true;
        Some(self.level.polygons.remove(index))
    }

    /// Remove the topmost polygon under the pointer
    pub fn delete_at(&mut self, point: Vec2) -> Option<Polygon> {
        let index = self.pick(point)?.polygon();
        self.selected = Some(index);
        self.delete_selected()
    }

    /// Change the kind of the selected polygon
    pub fn set_kind(&mut self, kind: PolygonKind) -> bool {
        match self.selected.and_then(|i| self.level.polygons.get_mut(i)) {
            Some(polygon) => {
                polygon.kind = kind;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn set_ball_start(&mut self, point: Vec2) {
        self.level.ball_start = self.level.bounds().clamp_point(point, 0.0);
        self.dirty = true;
    }

    /// Validated level JSON
    pub fn export_json(&mut self) -> Result<String, LevelError> {
        self.level.validate()?;
        let json = self.level.to_json()?;
        self.dirty = false;
        log::info!(
            "Exported level '{}' ({} polygons)",
            self.level.name,
            self.level.polygons.len()
        );
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Rect, regular_polygon};

    fn editor_with_square() -> Editor {
        let mut editor = Editor::default();
        editor
            .add_points(
                PolygonKind::Wall,
                vec![
                    Vec2::new(100.0, 100.0),
                    Vec2::new(200.0, 100.0),
                    Vec2::new(200.0, 200.0),
                    Vec2::new(100.0, 200.0),
                ],
            )
            .unwrap();
        editor
    }

    #[test]
    fn test_add_polygon_selects_it() {
        let mut editor = Editor::default();
        let index = editor.add_polygon(PolygonKind::Goal, Vec2::new(400.0, 100.0), 40.0, 6);
        assert_eq!(index, 0);
        assert_eq!(editor.selected, Some(0));
        assert_eq!(editor.level.polygons[0].points.len(), 6);
        assert!(editor.level.polygons[0].is_convex());
        assert!(editor.dirty);
    }

    #[test]
    fn test_add_points_rejects_concave() {
        let mut editor = Editor::default();
        let err = editor
            .add_points(
                PolygonKind::Wall,
                vec![
                    Vec2::new(0.0, 0.0),
                    Vec2::new(100.0, 0.0),
                    Vec2::new(50.0, 20.0),
                    Vec2::new(100.0, 100.0),
                    Vec2::new(0.0, 100.0),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, LevelError::NotConvex { index: 0 }));
        assert!(editor.level.polygons.is_empty());
    }

    #[test]
    fn test_add_points_rejects_star() {
        let pentagon = regular_polygon(Vec2::new(400.0, 300.0), 100.0, 5, 0.0);
        let star = [0, 2, 4, 1, 3].iter().map(|&i| pentagon[i]).collect();
        let mut editor = Editor::default();
        let err = editor.add_points(PolygonKind::Wall, star).unwrap_err();
        assert!(matches!(err, LevelError::NotConvex { index: 0 }));
        assert!(editor.level.polygons.is_empty());
    }

    #[test]
    fn test_pick_prefers_vertex_handle() {
        let editor = editor_with_square();
        assert_eq!(
            editor.pick(Vec2::new(103.0, 104.0)),
            Some(Pick::Vertex { polygon: 0, vertex: 0 })
        );
        assert_eq!(editor.pick(Vec2::new(150.0, 150.0)), Some(Pick::Polygon { polygon: 0 }));
        assert_eq!(editor.pick(Vec2::new(300.0, 300.0)), None);
    }

    #[test]
    fn test_pick_topmost_polygon() {
        let mut editor = editor_with_square();
        editor.add_polygon(PolygonKind::Barrier, Vec2::new(150.0, 150.0), 30.0, 4);
        assert_eq!(editor.pick(Vec2::new(150.0, 150.0)), Some(Pick::Polygon { polygon: 1 }));
    }

    #[test]
    fn test_drag_polygon_translates() {
        let mut editor = editor_with_square();
        editor.selected = None;
        assert_eq!(editor.begin_drag(Vec2::new(150.0, 150.0)), Some(Pick::Polygon { polygon: 0 }));
        assert_eq!(editor.selected, Some(0));
        assert!(editor.drag_to(Vec2::new(160.0, 150.0)));
        assert!(editor.drag_to(Vec2::new(170.0, 160.0)));
        editor.end_drag();

        let points = &editor.level.polygons[0].points;
        assert_eq!(points[0], Vec2::new(120.0, 110.0));
        assert_eq!(points[2], Vec2::new(220.0, 210.0));
        assert!(!editor.drag_to(Vec2::new(500.0, 500.0)));
    }

    #[test]
    fn test_drag_vertex_keeps_grab_offset() {
        let mut editor = editor_with_square();
        editor.begin_drag(Vec2::new(198.0, 102.0));
        assert!(editor.drag_to(Vec2::new(218.0, 92.0)));
        assert_eq!(editor.level.polygons[0].points[1], Vec2::new(220.0, 90.0));
    }

    #[test]
    fn test_drag_vertex_rejects_concave() {
        let mut editor = editor_with_square();
        editor.begin_drag(Vec2::new(200.0, 100.0));
        // Pull the corner inside the square
        assert!(!editor.drag_to(Vec2::new(140.0, 160.0)));
        assert_eq!(editor.level.polygons[0].points[1], Vec2::new(200.0, 100.0));
        assert!(editor.level.polygons[0].is_convex());
        // A later valid move from the same drag still works
        assert!(editor.drag_to(Vec2::new(210.0, 90.0)));
        assert_eq!(editor.level.polygons[0].points[1], Vec2::new(210.0, 90.0));
    }

    #[test]
    fn test_delete_selected_and_at() {
        let mut editor = editor_with_square();
        editor.add_polygon(PolygonKind::Goal, Vec2::new(500.0, 100.0), 30.0, 4);

        let removed = editor.delete_selected().unwrap();
        assert_eq!(removed.kind, PolygonKind::Goal);
        assert_eq!(editor.selected, None);
        assert!(editor.delete_selected().is_none());

        assert!(editor.delete_at(Vec2::new(500.0, 500.0)).is_none());
        assert!(editor.delete_at(Vec2::new(150.0, 150.0)).is_some());
        assert!(editor.level.polygons.is_empty());
    }

    #[test]
    fn test_set_kind() {
        let mut editor = editor_with_square();
        assert!(editor.set_kind(PolygonKind::Barrier));
        assert_eq!(editor.level.polygons[0].kind, PolygonKind::Barrier);
        editor.selected = None;
        assert!(!editor.set_kind(PolygonKind::Goal));
    }

    #[test]
    fn test_export_roundtrips_through_level_json() {
        let mut editor = editor_with_square();
        editor.add_polygon(PolygonKind::Goal, Vec2::new(650.0, 100.0), 40.0, 5);
        editor.set_ball_start(Vec2::new(-50.0, 300.0));
        assert_eq!(editor.level.ball_start, Vec2::new(0.0, 300.0));

        let json = editor.export_json().unwrap();
        assert!(!editor.dirty);
        let level = Level::from_json(&json).unwrap();
        assert_eq!(level, editor.level);
    }

    #[test]
    fn test_export_rejects_invalid_level() {
        let mut editor = Editor::new(Level {
            cage: Rect::new(700.0, 500.0, 200.0, 200.0),
            ..Level::default()
        });
        assert!(matches!(editor.export_json(), Err(LevelError::CageOutside)));
    }
}
