//! Workspace root package; hosts workspace-level tooling only.
