//! End-to-end scenarios for the CoffeeHub storefront widget.
//!
//! The tests under `tests/` drive a [`coffeehub_storefront::Storefront`]
//! purely through UI events, the way a page would, and check the rendered
//! fragments and persisted storage.
//!
//! ```bash
//! cargo test -p coffeehub-integration-tests
//! ```
