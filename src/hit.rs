//! Pointer hit testing for the study card.
//!
//! The card region is both a tap-to-flip surface and the parent of the
//! Prev / Next / Back buttons. A click is classified by walking from the
//! clicked node up its parent chain until the region boundary: meeting a
//! control anywhere on the way means "this was a button press", no matter
//! how deep inside the button the click landed.

use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Prev,
    Next,
    Back,
}

impl Control {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prev => "◀ Prev",
            Self::Next => "Next ▶",
            Self::Back => "Back",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Region,
    Container,
    Text,
    Control(Control),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    area: Rect,
    depth: usize,
}

/// Where a click landed relative to a boundary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Inside the boundary, not inside any control.
    Surface,
    /// On a control, or on something nested inside one.
    Control(Control),
    /// Not under the boundary at all.
    Outside,
}

/// Arena of nodes; parents are always added before their children.
#[derive(Debug, Clone, Default)]
pub struct HitTree {
    nodes: Vec<Node>,
}

impl HitTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, kind: NodeKind, area: Rect) -> NodeId {
        self.push(Node {
            kind,
            parent: None,
            area,
            depth: 0,
        })
    }

    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind, area: Rect) -> NodeId {
        let depth = self.nodes.get(parent.0).map_or(0, |p| p.depth + 1);
        self.push(Node {
            kind,
            parent: Some(parent),
            area,
            depth,
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(id.0).map(|n| n.kind)
    }

    pub fn area(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id.0).map(|n| n.area)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Deepest node whose area contains the cell; later siblings win ties.
    pub fn target_at(&self, x: u16, y: u16) -> Option<NodeId> {
        let pos = Position { x, y };
        let mut best: Option<(usize, usize)> = None;
        for (i, n) in self.nodes.iter().enumerate() {
            if !n.area.contains(pos) {
                continue;
            }
            if best.map_or(true, |(_, d)| n.depth >= d) {
                best = Some((i, n.depth));
            }
        }
        best.map(|(i, _)| NodeId(i))
    }

    /// Walk from `target` (inclusive) towards the root, stopping at
    /// `boundary`.
    pub fn classify(&self, target: NodeId, boundary: NodeId) -> Hit {
        let mut cur = Some(target);
        while let Some(id) = cur {
            let Some(node) = self.nodes.get(id.0) else {
                return Hit::Outside;
            };
            if let NodeKind::Control(c) = node.kind {
                return Hit::Control(c);
            }
            if id == boundary {
                return Hit::Surface;
            }
            cur = node.parent;
        }
        Hit::Outside
    }
}

/// Node ids of the study screen, built once per frame from its area.
#[derive(Debug, Clone)]
pub struct StudyLayout {
    pub tree: HitTree,
    pub region: NodeId,
    pub text: NodeId,
    pub bar: NodeId,
    pub prev: NodeId,
    pub next: NodeId,
    pub back: NodeId,
}

impl StudyLayout {
    pub fn control(&self, c: Control) -> NodeId {
        match c {
            Control::Prev => self.prev,
            Control::Next => self.next,
            Control::Back => self.back,
        }
    }

    /// Label node nested inside a button.
    pub fn label_of(&self, c: Control) -> NodeId {
        // each button is immediately followed by its label
        NodeId(self.control(c).0 + 1)
    }
}

/// Bordered card region: text on top, a one-line button bar at the bottom.
pub fn study_layout(area: Rect) -> StudyLayout {
    let mut tree = HitTree::new();
    let region = tree.add_root(NodeKind::Region, area);
    let inner = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    let bar_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(1),
        width: inner.width,
        height: inner.height.min(1),
    };
    let text_area = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    let text = tree.add_child(region, NodeKind::Text, text_area);
    let bar = tree.add_child(region, NodeKind::Container, bar_area);

    let mut x = bar_area.x.saturating_add(1);
    let mut ids = Vec::with_capacity(3);
    for c in [Control::Prev, Control::Next, Control::Back] {
        let w = c.label().width() as u16 + 4;
        let button_area = Rect {
            x,
            y: bar_area.y,
            width: w,
            height: bar_area.height,
        }
        .intersection(bar_area);
        let button = tree.add_child(bar, NodeKind::Control(c), button_area);
        let label_area = Rect {
            x: button_area.x.saturating_add(2),
            width: button_area.width.saturating_sub(4),
            ..button_area
        };
        tree.add_child(button, NodeKind::Text, label_area);
        ids.push(button);
        x = x.saturating_add(w + 1);
    }

    StudyLayout {
        tree,
        region,
        text,
        bar,
        prev: ids[0],
        next: ids[1],
        back: ids[2],
    }
}
