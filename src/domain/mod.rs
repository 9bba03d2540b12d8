// Domain layer: wire models shared by the HTTP core and the CLI.

pub mod model;
