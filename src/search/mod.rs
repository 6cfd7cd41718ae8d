/*!
 * Interactive search coordination on top of the store.
 */

pub mod coordinator;

pub use coordinator::SearchCoordinator;
