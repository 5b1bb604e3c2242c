//! Depth-first enter/leave traversal.

use crate::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Leaving,
}

impl Phase {
    pub fn is_entering(self) -> bool {
        self == Phase::Entering
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    Continue,
    /// Do not descend; the node still receives `Leaving`.
    SkipChildren,
    Stop,
}

/// A node as seen by the visitor, with the structural context the walker
/// already knows.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a Node,
    pub parent: Option<&'a Node>,
    pub has_next_sibling: bool,
}

/// Walk `root` in pre-order, calling `visitor` with `Entering` before a
/// node's children and `Leaving` after them.
///
/// An `Err` from the visitor aborts the walk and is returned as is.
pub fn walk<'a, E, F>(root: &'a Node, visitor: &mut F) -> Result<WalkStatus, E>
where
    F: FnMut(Visit<'a>, Phase) -> Result<WalkStatus, E>,
{
    walk_node(
        Visit {
            node: root,
            parent: None,
            has_next_sibling: false,
        },
        visitor,
    )
}

fn walk_node<'a, E, F>(visit: Visit<'a>, visitor: &mut F) -> Result<WalkStatus, E>
where
    F: FnMut(Visit<'a>, Phase) -> Result<WalkStatus, E>,
{
    match visitor(visit, Phase::Entering)? {
        WalkStatus::Stop => return Ok(WalkStatus::Stop),
        WalkStatus::SkipChildren => {}
        WalkStatus::Continue => {
            let children = &visit.node.children;
            for (idx, child) in children.iter().enumerate() {
                let child_visit = Visit {
                    node: child,
                    parent: Some(visit.node),
                    has_next_sibling: idx + 1 < children.len(),
                };
                if walk_node(child_visit, visitor)? == WalkStatus::Stop {
                    return Ok(WalkStatus::Stop);
                }
            }
        }
    }
    visitor(visit, Phase::Leaving)
}
