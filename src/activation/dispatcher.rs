//! Per-element activation bindings.
//!
//! The dispatcher holds at most one binding per [`ElementId`]. Binding an
//! element always drops whatever was bound before, including a pending dwell,
//! so a stale deadline can never fire and two behaviours never coexist.
//!
//! Time is passed in explicitly: the event loop calls [`ActivationDispatcher::tick`]
//! with the current instant and receives the actions whose dwell expired.

use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::config::{ActivationContext, ActivationMode};
use super::{ActivatableElement, ElementId};

/// Answers whether an element is currently on screen.
pub trait ElementHost {
    /// Returns `true` if the element is part of the visible board.
    fn is_attached(&self, id: ElementId) -> bool;
}

/// Disposer returned by [`ActivationDispatcher::bind`].
///
/// Disposing a handle whose binding has since been replaced does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingHandle {
    element: ElementId,
    generation: u64,
}

impl BindingHandle {
    /// Element this handle belongs to.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }
}

/// Observable state of one element's binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// Nothing bound
    Unbound,
    /// Dwell behaviour, no deadline running
    DwellIdle,
    /// Dwell behaviour, deadline running
    DwellPending,
    /// Click behaviour
    Immediate,
}

#[derive(Debug, Clone, Copy)]
struct PendingDwell {
    started: Instant,
    deadline: Instant,
}

#[derive(Debug)]
enum Behavior {
    Dwell {
        dwell: Duration,
        pending: Option<PendingDwell>,
    },
    Immediate,
}

#[derive(Debug)]
struct Binding<A> {
    generation: u64,
    action: A,
    behavior: Behavior,
}

/// Keeps each element's activation behaviour in line with the shared
/// [`ActivationContext`].
#[derive(Debug)]
pub struct ActivationDispatcher<A> {
    context: ActivationContext,
    bindings: BTreeMap<ElementId, Binding<A>>,
    next_generation: u64,
}

impl<A: Clone> ActivationDispatcher<A> {
    /// Creates a dispatcher reading its mode and dwell time from `context`.
    #[must_use]
    pub fn new(context: ActivationContext) -> Self {
        Self {
            context,
            bindings: BTreeMap::new(),
            next_generation: 0,
        }
    }

    /// The context this dispatcher reads from.
    #[must_use]
    pub const fn context(&self) -> &ActivationContext {
        &self.context
    }

    /// Replaces any existing binding for `element` with one matching the
    /// current configuration.
    ///
    /// Returns `None` when the element is not attached; the old binding is
    /// still removed in that case.
    pub fn bind(
        &mut self,
        host: &impl ElementHost,
        element: ElementId,
        action: A,
    ) -> Option<BindingHandle> {
        self.detach(element);

        if !host.is_attached(element) {
            trace!(%element, "skipping bind for detached element");
            return None;
        }

        let config = self.context.get();
        let behavior = match config.mode() {
            ActivationMode::Dwell => Behavior::Dwell {
                dwell: config.dwell(),
                pending: None,
            },
            ActivationMode::Immediate => Behavior::Immediate,
        };

        let generation = self.next_generation;
        self.next_generation += 1;
        self.bindings.insert(
            element,
            Binding {
                generation,
                action,
                behavior,
            },
        );

        Some(BindingHandle {
            element,
            generation,
        })
    }

    /// Binds every element in `elements` and drops bindings for anything
    /// that is no longer listed or no longer attached.
    pub fn rebind_all(&mut self, host: &impl ElementHost, elements: &[ActivatableElement<A>]) {
        let listed: HashSet<ElementId> = elements.iter().map(|e| e.id).collect();
        let stale: Vec<ElementId> = self
            .bindings
            .keys()
            .copied()
            .filter(|id| !listed.contains(id))
            .collect();
        for id in stale {
            self.detach(id);
        }

        for element in elements {
            self.bind(host, element.id, element.action.clone());
        }

        let config = self.context.get();
        debug!(
            mode = %config.mode(),
            dwell_ms = config.dwell_ms(),
            bound = self.bindings.len(),
            "rebound activation for all elements"
        );
    }

    /// Removes the binding identified by `handle` if it is still current.
    pub fn dispose(&mut self, handle: BindingHandle) -> bool {
        let current = self
            .bindings
            .get(&handle.element)
            .is_some_and(|binding| binding.generation == handle.generation);
        if current {
            self.detach(handle.element);
        }
        current
    }

    /// Removes whatever is bound to `element`.
    pub fn unbind(&mut self, element: ElementId) -> bool {
        self.detach(element)
    }

    /// Removes every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Pointer moved onto `element`. Starts (or restarts) its dwell deadline.
    pub fn pointer_enter(&mut self, element: ElementId, now: Instant) {
        if let Some(Binding {
            behavior: Behavior::Dwell { dwell, pending },
            ..
        }) = self.bindings.get_mut(&element)
        {
            *pending = Some(PendingDwell {
                started: now,
                deadline: now + *dwell,
            });
            trace!(%element, "dwell started");
        }
    }

    /// Pointer moved off `element`. Cancels its dwell deadline.
    pub fn pointer_leave(&mut self, element: ElementId) {
        if let Some(Binding {
            behavior: Behavior::Dwell { pending, .. },
            ..
        }) = self.bindings.get_mut(&element)
        {
            if pending.take().is_some() {
                trace!(%element, "dwell cancelled");
            }
        }
    }

    /// Primary click on `element`. Yields its action in immediate mode only.
    pub fn click(&mut self, element: ElementId) -> Option<A> {
        match self.bindings.get(&element) {
            Some(Binding {
                behavior: Behavior::Immediate,
                action,
                ..
            }) => Some(action.clone()),
            _ => None,
        }
    }

    /// Fires every dwell whose deadline is at or before `now`, in element order.
    ///
    /// A fired dwell does not restart; the pointer has to leave and re-enter.
    pub fn tick(&mut self, now: Instant) -> Vec<A> {
        let mut fired = Vec::new();
        for (id, binding) in &mut self.bindings {
            if let Behavior::Dwell { pending, .. } = &mut binding.behavior {
                if pending.is_some_and(|p| p.deadline <= now) {
                    *pending = None;
                    debug!(element = %id, "dwell expired");
                    fired.push(binding.action.clone());
                }
            }
        }
        fired
    }

    /// Earliest pending deadline, if any dwell is running.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.bindings
            .values()
            .filter_map(|binding| match binding.behavior {
                Behavior::Dwell {
                    pending: Some(p), ..
                } => Some(p.deadline),
                _ => None,
            })
            .min()
    }

    /// Fraction of the dwell time elapsed for `element`, from 0.0 to 1.0.
    #[must_use]
    pub fn dwell_progress(&self, element: ElementId, now: Instant) -> Option<f32> {
        match self.bindings.get(&element)?.behavior {
            Behavior::Dwell {
                dwell,
                pending: Some(p),
            } => {
                let elapsed = now.saturating_duration_since(p.started).as_secs_f32();
                let total = dwell.as_secs_f32();
                Some((elapsed / total).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }

    /// State of `element`'s binding.
    #[must_use]
    pub fn state(&self, element: ElementId) -> BindingState {
        match self.bindings.get(&element).map(|b| &b.behavior) {
            None => BindingState::Unbound,
            Some(Behavior::Immediate) => BindingState::Immediate,
            Some(Behavior::Dwell { pending: None, .. }) => BindingState::DwellIdle,
            Some(Behavior::Dwell {
                pending: Some(_), ..
            }) => BindingState::DwellPending,
        }
    }

    /// Returns `true` if something is bound to `element`.
    #[must_use]
    pub fn is_bound(&self, element: ElementId) -> bool {
        self.bindings.contains_key(&element)
    }

    /// Number of bound elements.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Number of dwell deadlines currently running.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.bindings
            .values()
            .filter(|b| {
                matches!(
                    b.behavior,
                    Behavior::Dwell {
                        pending: Some(_),
                        ..
                    }
                )
            })
            .count()
    }

    fn detach(&mut self, element: ElementId) -> bool {
        match self.bindings.remove(&element) {
            Some(old) => {
                if matches!(
                    old.behavior,
                    Behavior::Dwell {
                        pending: Some(_),
                        ..
                    }
                ) {
                    debug!(%element, "dropped pending dwell while detaching");
                }
                true
            }
            None => false,
        }
    }
}
