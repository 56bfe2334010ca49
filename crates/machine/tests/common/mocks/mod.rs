//! Mocks for machine collaborators.
