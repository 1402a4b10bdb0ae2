//! Clinic domain model.
//!
//! # Responsibility
//! - Define the eight record kinds, their closed menus and their rule chains.
//! - Describe each domain's table shape through the [`domain::Domain`] trait so
//!   one generic store and one lifecycle service serve all of them.
//!
//! # Invariants
//! - Every record is identified by a [`record::RecordId`] assigned once at
//!   creation and never reassigned.
//! - Menu-backed fields only ever hold one of their enumeration's values.

#[macro_use]
pub mod menu;

pub mod appointment;
pub mod boarder;
pub mod domain;
pub mod ids;
pub mod item;
pub mod kennel;
pub mod lab;
pub mod patient;
pub mod personnel;
pub mod record;
pub mod transaction;
