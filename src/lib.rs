//! Classic in-memory data structures.
//!
//! The centerpiece is [`avl_tree::AvlSet`], a height-balanced ordered set with
//! logarithmic insert, remove, and membership queries. Around it sit the usual
//! companions: concurrent queues in [`sync`], a binary heap in
//! [`priority_queue`], a frequency counter in [`counter`], an insertion-ordered
//! map in [`ordered_map`], and a family of comparison sorts in [`sort`].

pub mod avl_tree;
pub mod counter;
pub mod ordered_map;
pub mod priority_queue;
pub mod sort;
pub mod sync;
