/// Type used for distinguishing between the authoritative playback host and
/// the observers mirroring it
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Authority,
    Observer,
}

impl Role {
    pub fn invert(&self) -> Role {
        match self {
            Role::Authority => Role::Observer,
            Role::Observer => Role::Authority,
        }
    }
}

// Typedefs
pub type CommandIndex = u64;
