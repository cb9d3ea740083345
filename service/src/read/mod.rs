//! Read models composed out of several backend entities.

pub mod dashboard;
