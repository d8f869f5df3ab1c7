#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use slab::Slab;

/// This data structure is a single instance of a quad-edge data structure.
///
/// Each [`Quad`] holds the four darts of one undirected edge: the two primal
/// darts (`r == 0` and `r == 2`) carry `AData`, the two dual darts (`r == 1`
/// and `r == 3`) carry `BData`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Qeds<AData, BData> {
    /// The slab of quads which we index into.
    pub quads: Slab<Quad<AData, BData>>,
}

impl<AData: Default, BData: Default> Qeds<AData, BData> {
    /// Create an edge in the [`Qeds`].
    pub fn make_edge(&mut self) -> EdgeRefA<'_, AData, BData> {
        self.make_edge_with_a(Default::default(), Default::default())
    }
}

impl<AData, BData: Default> Qeds<AData, BData> {
    /// Create an isolated edge from `org` to `dest`. Both primal darts are
    /// alone in their origin rings and the two dual darts form the single
    /// ring of the one face surrounding the edge.
    pub fn make_edge_with_a(&mut self, org: AData, dest: AData) -> EdgeRefA<'_, AData, BData> {
        let entry = self.quads.vacant_entry();
        let this_index = entry.key();
        let quad = Quad {
            edges_a: [
                // The base edge e.
                Edge::new(EdgeTarget::new(this_index, 0), org),
                // eSym
                Edge::new(EdgeTarget::new(this_index, 2), dest),
            ],
            edges_b: [
                // eRot
                Edge::new(EdgeTarget::new(this_index, 3), Default::default()),
                // eSymRot
                Edge::new(EdgeTarget::new(this_index, 1), Default::default()),
            ],
        };
        entry.insert(quad);
        let t: &Qeds<AData, BData> = self;
        EdgeRefA {
            qeds: t,
            target: EdgeTarget::new(this_index, 0),
        }
    }
}

impl<AData: Clone, BData: Default> Qeds<AData, BData> {
    /// Connect the Dest of a with the Org of b by creating a new edge. The
    /// new edge shares a left face with both a and b.
    pub fn connect(
        &mut self,
        edge_a: EdgeTarget,
        edge_b: EdgeTarget,
    ) -> EdgeRefA<'_, AData, BData> {
        // Set the Org of e to the Dest of a
        let p1 = self.edge_a(edge_a.sym()).point.clone();
        // Set the Dest of e to the Org of b
        let p2 = self.edge_a(edge_b).point.clone();
        let q_target = self.make_edge_with_a(p1, p2).target;
        let a_lnext = self.edge_a_ref(edge_a).l_next().target;
        self.splice(q_target, a_lnext);
        self.splice(q_target.sym(), edge_b);
        self.edge_a_ref(q_target)
    }
}

impl<AData: Clone, BData> Qeds<AData, BData> {
    /// Turn e counter-clockwise inside the quadrilateral formed by its two
    /// adjacent triangles, so that it joins the other two corners.
    pub fn swap(&mut self, e: EdgeTarget) {
        let a = self.edge_a_ref(e).oprev().target();
        let b = self.edge_a_ref(e).sym().oprev().target();

        self.splice(e, a);
        self.splice(e.sym(), b);

        let a_lnext = self.edge_a_ref(a).l_next().target();
        self.splice(e, a_lnext);

        let b_lnext = self.edge_a_ref(b).l_next().target();
        self.splice(e.sym(), b_lnext);

        let a_dest = self.edge_a(a.sym()).point.clone();
        let b_dest = self.edge_a(b.sym()).point.clone();
        self.edge_a_mut(e).point = a_dest;
        self.edge_a_mut(e.sym()).point = b_dest;
    }
}

impl<AData, BData> Qeds<AData, BData> {
    pub fn new() -> Self {
        Self { quads: Slab::new() }
    }

    pub fn edge_a(&self, target: EdgeTarget) -> &Edge<AData> {
        if target.r == 0 || target.r == 2 {
            &self.quads[target.e].edges_a[(target.r / 2) as usize]
        } else {
            unreachable!()
        }
    }

    pub fn edge_b(&self, target: EdgeTarget) -> &Edge<BData> {
        if target.r == 0 || target.r == 2 {
            unreachable!()
        } else {
            &self.quads[target.e].edges_b[(target.r / 2) as usize]
        }
    }

    pub fn edge_a_ref(&self, target: EdgeTarget) -> EdgeRefA<'_, AData, BData> {
        EdgeRefA { qeds: self, target }
    }

    pub fn edge_a_mut(&mut self, target: EdgeTarget) -> &mut Edge<AData> {
        if target.r == 0 || target.r == 2 {
            &mut self.quads[target.e].edges_a[(target.r / 2) as usize]
        } else {
            unreachable!()
        }
    }

    pub fn edge_b_mut(&mut self, target: EdgeTarget) -> &mut Edge<BData> {
        if target.r == 0 || target.r == 2 {
            unreachable!()
        } else {
            &mut self.quads[target.e].edges_b[(target.r / 2) as usize]
        }
    }

    /// The `next` pointer of any dart, primal or dual.
    pub fn onext(&self, target: EdgeTarget) -> EdgeTarget {
        if target.is_primal() {
            self.edge_a(target).next
        } else {
            self.edge_b(target).next
        }
    }

    fn set_next(&mut self, target: EdgeTarget, next: EdgeTarget) {
        if target.is_primal() {
            self.edge_a_mut(target).next = next;
        } else {
            self.edge_b_mut(target).next = next;
        }
    }

    /// Exchange the origin rings of a and b, and with them the left-face
    /// rings of their successors. Merges two distinct rings into one, or
    /// splits one ring in two. Applying it twice restores the original.
    pub fn splice(&mut self, edge_a: EdgeTarget, edge_b: EdgeTarget) {
        let a_next = self.onext(edge_a);
        let b_next = self.onext(edge_b);
        let alpha = a_next.rot();
        let beta = b_next.rot();

        // We want to swap aOnext with bOnext and αOnext with βONext
        self.set_next(edge_a, b_next);
        self.set_next(edge_b, a_next);

        let alpha_next = self.onext(alpha);
        let beta_next = self.onext(beta);
        self.set_next(alpha, beta_next);
        self.set_next(beta, alpha_next);
    }

    /// Disconnect e from the rest of the subdivision and release its quad.
    /// The two faces on either side of e become one.
    pub fn delete(&mut self, e: EdgeTarget) {
        let oprev = self.edge_a_ref(e).oprev().target();
        self.splice(e, oprev);
        let sym_oprev = self.edge_a_ref(e).sym().oprev().target();
        self.splice(e.sym(), sym_oprev);
        self.quads.remove(e.e);
    }

    pub fn base_edges(&self) -> BaseEdgeIter<'_, AData, BData> {
        BaseEdgeIter::new(self)
    }

    /// The base dart of every live quad, in arena order.
    pub fn base_targets(&self) -> impl Iterator<Item = EdgeTarget> + '_ {
        self.quads.iter().map(|(i, _)| EdgeTarget::new(i, 0))
    }
}

impl<AData, BData> Default for Qeds<AData, BData> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BaseEdgeIter<'a, AData, BData> {
    qeds: &'a Qeds<AData, BData>,
    quad_iter: slab::Iter<'a, Quad<AData, BData>>,
}

impl<'a, AData, BData> BaseEdgeIter<'a, AData, BData> {
    fn new(qeds: &'a Qeds<AData, BData>) -> Self {
        Self {
            qeds,
            quad_iter: qeds.quads.iter(),
        }
    }
}

impl<'a, AData, BData> Iterator for BaseEdgeIter<'a, AData, BData> {
    type Item = EdgeRefA<'a, AData, BData>;
    fn next(&mut self) -> Option<Self::Item> {
        let quad = self.quad_iter.next()?;
        Some(self.qeds.edge_a_ref(EdgeTarget::new(quad.0, 0)))
    }
}

#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Quad<AData, BData> {
    pub edges_a: [Edge<AData>; 2],
    pub edges_b: [Edge<BData>; 2],
}

#[derive(Debug)]
pub struct EdgeRefA<'a, AData, BData> {
    pub qeds: &'a Qeds<AData, BData>,
    pub target: EdgeTarget,
}

impl<'a, AData, BData> Clone for EdgeRefA<'a, AData, BData> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, AData, BData> Copy for EdgeRefA<'a, AData, BData> {}

impl<'a, AData, BData> EdgeRefA<'a, AData, BData> {
    pub fn target(&self) -> EdgeTarget {
        self.target
    }
    pub fn edge(&self) -> &'a Edge<AData> {
        self.qeds.edge_a(self.target)
    }

    #[inline(always)]
    pub fn offset_r(&self, offset: u8) -> Self {
        Self {
            qeds: self.qeds,
            target: self.target.offset_r(offset),
        }
    }

    #[inline(always)]
    pub fn onext(&self) -> Self {
        Self {
            qeds: self.qeds,
            target: self.edge().next,
        }
    }

    /// Rot
    #[inline(always)]
    pub fn rot(&self) -> EdgeRefB<'a, AData, BData> {
        EdgeRefB {
            qeds: self.qeds,
            target: self.target.rot(),
        }
    }

    #[inline(always)]
    pub fn inv_rot(&self) -> EdgeRefB<'a, AData, BData> {
        EdgeRefB {
            qeds: self.qeds,
            target: self.target.inv_rot(),
        }
    }

    #[inline(always)]
    pub fn sym(&self) -> Self {
        self.offset_r(2)
    }

    #[inline(always)]
    pub fn oprev(&self) -> Self {
        self.rot().onext().rot()
    }

    #[inline(always)]
    pub fn d_prev(&self) -> Self {
        self.inv_rot().onext().inv_rot()
    }

    #[inline(always)]
    pub fn l_prev(&self) -> Self {
        self.onext().sym()
    }

    #[inline(always)]
    pub fn l_next(&self) -> Self {
        self.inv_rot().onext().rot()
    }
}

#[derive(Debug)]
pub struct EdgeRefB<'a, AData, BData> {
    pub qeds: &'a Qeds<AData, BData>,
    pub target: EdgeTarget,
}

impl<'a, AData, BData> Clone for EdgeRefB<'a, AData, BData> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, AData, BData> Copy for EdgeRefB<'a, AData, BData> {}

impl<'a, AData, BData> EdgeRefB<'a, AData, BData> {
    pub fn target(&self) -> EdgeTarget {
        self.target
    }

    pub fn edge(&self) -> &'a Edge<BData> {
        self.qeds.edge_b(self.target)
    }

    #[inline(always)]
    pub fn onext(&self) -> Self {
        Self {
            qeds: self.qeds,
            target: self.edge().next,
        }
    }

    /// Rot
    #[inline(always)]
    pub fn rot(&self) -> EdgeRefA<'a, AData, BData> {
        EdgeRefA {
            qeds: self.qeds,
            target: self.target.rot(),
        }
    }

    #[inline(always)]
    pub fn sym(&self) -> Self {
        Self {
            qeds: self.qeds,
            target: self.target.sym(),
        }
    }

    #[inline(always)]
    pub fn inv_rot(&self) -> EdgeRefA<'a, AData, BData> {
        EdgeRefA {
            qeds: self.qeds,
            target: self.target.inv_rot(),
        }
    }
}

impl<AData, BData> PartialEq for EdgeRefA<'_, AData, BData> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.qeds, other.qeds) && self.target == other.target
    }
}

impl<AData, BData> Eq for EdgeRefA<'_, AData, BData> {}

impl<AData, BData> PartialEq for EdgeRefB<'_, AData, BData> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.qeds, other.qeds) && self.target == other.target
    }
}

impl<AData, BData> Eq for EdgeRefB<'_, AData, BData> {}

/// The address of one dart: a quad in the slab and the rotation within it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct EdgeTarget {
    // The index of the Quad in the Qeds.
    pub e: usize,
    // Can only be 0, 1, 2, or 3.
    pub r: u8,
}

impl EdgeTarget {
    pub fn new(e: usize, r: u8) -> Self {
        Self { e, r }
    }

    #[inline(always)]
    fn offset_r(&self, offset: u8) -> Self {
        let mut q = *self;
        q.r = (q.r + offset) % 4;
        q
    }

    /// Rot
    #[inline(always)]
    pub fn rot(&self) -> Self {
        self.offset_r(1)
    }

    #[inline(always)]
    pub fn sym(&self) -> Self {
        self.offset_r(2)
    }

    #[inline(always)]
    pub fn inv_rot(&self) -> Self {
        self.offset_r(3)
    }

    pub fn is_primal(&self) -> bool {
        self.r % 2 == 0
    }
}

/// One dart. `mark` is scratch space for a single traversal and carries no
/// meaning between traversals.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Edge<Data> {
    pub next: EdgeTarget,
    pub point: Data,
    pub mark: bool,
}

impl<Data> Edge<Data> {
    fn new(next: EdgeTarget, point: Data) -> Self {
        Self {
            next,
            point,
            mark: false,
        }
    }
}
