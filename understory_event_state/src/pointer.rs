// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer registry: track active pointers and which handler owns each one.
//!
//! ## Usage
//!
//! 1) Call [`PointerRegistry::down`] when a pointer is pressed.
//! 2) Call [`PointerRegistry::moved`] on every move of a pressed pointer; the
//!    previous position is kept as [`Pointer::last_position`].
//! 3) Handlers that want exclusive use of a pointer [`claim`](PointerRegistry::claim)
//!    it. A pointer has at most one owner; ownership can be handed over with
//!    [`transfer`](PointerRegistry::transfer).
//! 4) Call [`PointerRegistry::up`] on release or cancel. This removes the entry
//!    and with it any claim.
//!
//! The owner type is generic so applications can use their own handler ids.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::pointer::{PointerId, PointerKind, PointerRegistry};
//!
//! let mut pointers = PointerRegistry::<&str>::new();
//! pointers.down(PointerId(1), PointerKind::Touch, Point::new(10.0, 10.0), 0);
//! assert!(pointers.claim(PointerId(1), "drag"));
//! assert!(!pointers.claim(PointerId(1), "pinch"));
//!
//! pointers.moved(PointerId(1), Point::new(14.0, 13.0));
//! let p = pointers.get(PointerId(1)).unwrap();
//! assert_eq!(p.delta().x, 4.0);
//!
//! let released = pointers.up(PointerId(1)).unwrap();
//! assert_eq!(released.owner, Some("drag"));
//! assert!(pointers.is_empty());
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Host‑assigned pointer identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// The device class that produced a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    /// A mouse or other indirect device.
    #[default]
    Mouse,
    /// A finger on a touch surface.
    Touch,
    /// A stylus.
    Pen,
}

/// A pressed pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer<O> {
    /// Pointer identifier.
    pub id: PointerId,
    /// Device class.
    pub kind: PointerKind,
    /// Latest screen position.
    pub position: Point,
    /// Screen position before the latest move.
    pub last_position: Point,
    /// Host timestamp of the press, in milliseconds.
    pub down_time: u64,
    /// Handler currently owning this pointer, if any.
    pub owner: Option<O>,
}

impl<O> Pointer<O> {
    /// Movement of the latest move event.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.position - self.last_position
    }
}

/// Set of pressed pointers in press order.
#[derive(Clone, Debug)]
pub struct PointerRegistry<O> {
    pointers: SmallVec<[Pointer<O>; 4]>,
}

impl<O> Default for PointerRegistry<O> {
    fn default() -> Self {
        Self {
            pointers: SmallVec::new(),
        }
    }
}

impl<O: Copy + Eq> PointerRegistry<O> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press. Returns `false` if the pointer was already pressed,
    /// in which case only its position is refreshed.
    pub fn down(&mut self, id: PointerId, kind: PointerKind, position: Point, time: u64) -> bool {
        if let Some(p) = self.get_mut(id) {
            p.last_position = p.position;
            p.position = position;
            return false;
        }
        self.pointers.push(Pointer {
            id,
            kind,
            position,
            last_position: position,
            down_time: time,
            owner: None,
        });
        true
    }

    /// Records a move of a pressed pointer. Unknown pointers (for example a
    /// hovering mouse) are ignored and yield `None`.
    pub fn moved(&mut self, id: PointerId, position: Point) -> Option<&Pointer<O>> {
        let p = self.get_mut(id)?;
        p.last_position = p.position;
        p.position = position;
        Some(p)
    }

    /// Removes a pointer on release or cancel, returning its final state.
    pub fn up(&mut self, id: PointerId) -> Option<Pointer<O>> {
        let index = self.pointers.iter().position(|p| p.id == id)?;
        Some(self.pointers.remove(index))
    }

    /// Removes every pointer.
    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    /// Looks up a pressed pointer.
    #[must_use]
    pub fn get(&self, id: PointerId) -> Option<&Pointer<O>> {
        self.pointers.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: PointerId) -> Option<&mut Pointer<O>> {
        self.pointers.iter_mut().find(|p| p.id == id)
    }

    /// Number of pressed pointers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// Returns `true` when no pointer is pressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Pressed pointers in press order.
    pub fn iter(&self) -> impl Iterator<Item = &Pointer<O>> {
        self.pointers.iter()
    }

    /// Owner of a pointer, or `None` if it is unclaimed or unknown.
    #[must_use]
    pub fn owner(&self, id: PointerId) -> Option<O> {
        self.get(id).and_then(|p| p.owner)
    }

    /// Claims an unclaimed pointer. Succeeds if the pointer is unclaimed or
    /// already owned by `owner`.
    pub fn claim(&mut self, id: PointerId, owner: O) -> bool {
        match self.get_mut(id) {
            Some(p) if p.owner.is_none() || p.owner == Some(owner) => {
                p.owner = Some(owner);
                true
            }
            _ => false,
        }
    }

    /// Hands a pointer to `owner` regardless of its current owner.
    ///
    /// Returns the previous owner. Unknown pointers are left alone.
    pub fn transfer(&mut self, id: PointerId, owner: O) -> Option<O> {
        let p = self.get_mut(id)?;
        p.owner.replace(owner)
    }

    /// Releases a claim held by `owner`. Claims held by others are untouched.
    pub fn release(&mut self, id: PointerId, owner: O) -> bool {
        match self.get_mut(id) {
            Some(p) if p.owner == Some(owner) => {
                p.owner = None;
                true
            }
            _ => false,
        }
    }

    /// Releases every claim held by `owner`.
    pub fn release_all(&mut self, owner: O) {
        for p in self.pointers.iter_mut().filter(|p| p.owner == Some(owner)) {
            p.owner = None;
        }
    }

    /// Pointers owned by `owner`, in press order.
    pub fn owned_by(&self, owner: O) -> impl Iterator<Item = &Pointer<O>> {
        self.pointers.iter().filter(move |p| p.owner == Some(owner))
    }

    /// Average position of the pointers owned by `owner`.
    #[must_use]
    pub fn centroid(&self, owner: O) -> Option<Point> {
        let mut sum = Vec2::ZERO;
        let mut count = 0_u32;
        for p in self.owned_by(owner) {
            sum += p.position.to_vec2();
            count += 1;
        }
        (count > 0).then(|| (sum / f64::from(count)).to_point())
    }
}
