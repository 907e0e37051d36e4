#![forbid(unsafe_code)]

//! Property bindings between elements, property bags, and callbacks.
//!
//! - [`Target`]: where a bound value goes. Its shape (callback, settable,
//!   plain bag) is fixed when the binding is made.
//! - [`BindingList`]: the ordered entries for one source property. Removal
//!   leaves a hole; iteration skips holes.
//! - [`BoundElement`]: an [`ElementHost`] plus its binding tables. Implements
//!   [`Settable`] and [`Bindable`] so it can be both source and target.
//!
//! # Invariants
//!
//! 1. Targets are notified in registration order.
//! 2. Binding the same `(key, target, target_key)` twice yields two entries
//!    and two notifications per write.
//! 3. `set` fans out even when the value did not change. The one exception
//!    is an echo: a re-entrant write of the value already fanning out for
//!    that key on that element is stored without a second fan-out.
//! 4. Fan-out iterates a snapshot of the entry list. Bindings added or
//!    removed by a target while it is being notified apply from the next
//!    write on. A re-entrant write of a different value for the same key
//!    fans out in full and ends the outer pass, so later targets see only
//!    the newer value.
//! 5. At most one change listener is attached per `(element, key)`.
//! 6. A two-way bind is two independent one-way entries. Nothing is synced
//!    at bind time.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Target error | Callback or settable returns `Err` | Fan-out aborts, error returned to the writer |
//! | Dropped target | Settable target freed | `BindError::TargetDropped` at notify time |
//! | Busy bag | Plain target already borrowed | `BindError::TargetBusy` at notify time |
//! | Unknown key | Unbind on a key never bound | No-op |
//!
//! [`ElementHost`]: bindery_core::ElementHost

mod bound;
mod list;
mod target;

pub use bound::BoundElement;
pub use list::{BindingEntry, BindingList};
pub use target::{Bindable, Settable, Target, TargetKind};
