/// Capacities of the interpreter's four stacks.  Exceeding one is a checked `StackOverflow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackLimits {
    /// Maximum depth of the data stack.
    pub data: usize,
    /// Maximum number of nested verb calls.
    pub returns: usize,
    /// Maximum number of nested do/loop frames.
    pub loops: usize,
    /// Maximum depth of the aux stash used by >r, r> and r@.
    pub aux: usize,
}

/// Everything that can be tuned about one interpreter context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub limits: StackLimits,

    /// When false, an arithmetic verb given an operand of the other numeric family reads that
    /// operand's raw 32 bits as its own family.  When true that is a `TypeMismatch` error.
    pub strict_types: bool,

    /// Source files must be strictly smaller than this many bytes.
    pub max_source_bytes: usize,
}

impl Default for StackLimits {
    fn default() -> Self {
        Self {
            data: 64,
            returns: 32,
            loops: 32,
            aux: 32,
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            limits: StackLimits::default(),
            strict_types: false,
            max_source_bytes: 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let cfg = InterpreterConfig::default();
        assert_eq!(cfg.limits.data, 64);
        assert_eq!(cfg.limits.returns, 32);
        assert!(!cfg.strict_types);
        assert_eq!(cfg.max_source_bytes, 1 << 20);
    }
}
