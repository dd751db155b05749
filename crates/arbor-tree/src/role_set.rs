use std::fmt;

use crate::Role;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleSet {
    bits: u16,
}

impl RoleSet {
    pub const EMPTY: Self = Self { bits: 0 };

    const fn from_role(role: Role) -> Self {
        let index = role as u16;
        debug_assert!(index < u16::BITS as u16, "Index out of bounds. Widen the bitset.");
        Self { bits: 1 << index }
    }

    pub const fn union(self, other: Self) -> Self {
        Self { bits: self.bits | other.bits }
    }

    pub const fn new<const N: usize>(roles: [Role; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < roles.len() {
            set = set.union(Self::from_role(roles[i]));
            i += 1;
        }

        set
    }

    pub const fn contains(self, role: Role) -> bool {
        self.bits & Self::from_role(role).bits != 0
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ALL: [Role; 6] = [
            Role::SourceFile,
            Role::Expression,
            Role::Statement,
            Role::Identifier,
            Role::ComprehensionClause,
            Role::ComprehensionCondition,
        ];
        f.debug_set().entries(ALL.iter().filter(|role| self.contains(**role))).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RoleSet;
    use crate::Role;

    #[test]
    fn union_and_contains() {
        let set = RoleSet::new([Role::Expression]).union(RoleSet::new([Role::Statement]));
        assert!(set.contains(Role::Expression));
        assert!(set.contains(Role::Statement));
        assert!(!set.contains(Role::Identifier));
        assert!(RoleSet::EMPTY.is_empty());
        assert_eq!(format!("{set:?}"), "{Expression, Statement}");
    }
}
