use crate::style::Edge;
use crate::units::Pt;
use serde::{Deserialize, Serialize};

/// One value per side of a box. Used for page margins, cell paddings and border styles.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

/// Margins are used when laying out tables on a page. Nothing prevents content from
/// overflowing the margins; they are guidelines for the layout functions, which treat
/// the area inside them as the page's content area.
pub type Margins = Edges<Pt>;

impl<T> Edges<T> {
    /// Create edges by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: T, right: T, bottom: T, left: T) -> Edges<T> {
        Edges {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn get(&self, edge: Edge) -> &T {
        match edge {
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
            Edge::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, edge: Edge) -> &mut T {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
        }
    }

    pub fn set(&mut self, edge: Edge, value: T) {
        *self.get_mut(edge) = value;
    }

    /// Iterate over the edges clockwise, starting at the top
    pub fn iter(&self) -> impl Iterator<Item = (Edge, &T)> {
        Edge::ALL.into_iter().map(move |edge| (edge, self.get(edge)))
    }
}

impl<T: Clone> Edges<T> {
    /// Create edges where all values are equal
    pub fn all<D: Into<T>>(value: D) -> Edges<T> {
        let value: T = value.into();
        Edges {
            top: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            left: value,
        }
    }

    /// Create edges by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) edges
    pub fn symmetric(vertical: T, horizontal: T) -> Edges<T> {
        Edges {
            top: vertical.clone(),
            right: horizontal.clone(),
            bottom: vertical,
            left: horizontal,
        }
    }
}

impl<T> Edges<Option<T>> {
    /// Fill every unset edge from `defaults`, leaving edges that already have a value alone
    pub fn fill_from(&mut self, defaults: &Edges<Option<T>>)
    where
        T: Clone,
    {
        for edge in Edge::ALL {
            if self.get(edge).is_none() {
                if let Some(value) = defaults.get(edge) {
                    self.set(edge, Some(value.clone()));
                }
            }
        }
    }
}

impl Margins {
    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// The sum of the left and right margins
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// The sum of the top and bottom margins
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_by_edge() {
        let mut m = Margins::trbl(Pt(30.0), Pt(20.0), Pt(30.0), Pt(10.0));
        assert_eq!(*m.get(Edge::Left), Pt(10.0));
        m.set(Edge::Left, Pt(20.0));
        assert_eq!(m.horizontal(), Pt(40.0));
        assert_eq!(m.vertical(), Pt(60.0));
    }

    #[test]
    fn fills_only_missing_edges() {
        let mut own: Edges<Option<Pt>> = Edges::default();
        own.top = Some(Pt(5.0));
        let defaults: Edges<Option<Pt>> = Edges::all(Some(Pt(1.0)));
        own.fill_from(&defaults);
        assert_eq!(own, Edges::trbl(Some(Pt(5.0)), Some(Pt(1.0)), Some(Pt(1.0)), Some(Pt(1.0))));
    }
}
