//! Output declaration DOM.
//!
//! The synthesized declaration tree lives in a `DeclArena`; declarations
//! reference each other by `DeclId` so identity survives tree assembly and a
//! class alias can point at the class it renames. Parent/qualified-path
//! bookkeeping is kept out-of-band in a [`ParentMap`] instead of on every
//! declaration variant, because a declaration's final tree position is often
//! decided after its content is synthesized.

use rustc_hash::FxHashMap;

/// Index of a declaration in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeclId(pub u32);

/// Output type of a translated JSDoc type expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Any,
    Number,
    Boolean,
    String,
    Object,
    Void,
    This,
    Null,
    Undefined,
    Named(String),
    Array(Box<Type>),
    Union(Vec<Type>),
    NumberLiteral(f64),
    StringLiteral(String),
    ObjectType(Vec<ObjectTypeMember>),
    FunctionType {
        params: Vec<Parameter>,
        return_type: Box<Type>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeMember {
    pub name: String,
    pub ty: Type,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
    pub optional: bool,
}

/// A node of the synthesized declaration tree.
#[derive(Clone, Debug)]
pub enum Declaration {
    Namespace {
        name: String,
        /// Ordered, append-only member list.
        members: Vec<DeclId>,
    },
    Class {
        name: String,
        members: Vec<DeclId>,
        base: Option<DeclId>,
    },
    Interface {
        name: String,
        members: Vec<DeclId>,
        base: Option<DeclId>,
    },
    /// Shell only; enum member population is a known gap carried over from
    /// the observed resolution rules.
    Enum { name: String },
    Function {
        name: String,
        params: Vec<Parameter>,
        return_type: Type,
    },
    Method {
        name: String,
        params: Vec<Parameter>,
        return_type: Type,
    },
    Constructor { params: Vec<Parameter> },
    Property {
        name: String,
        ty: Type,
        read_only: bool,
    },
    Variable { name: String, ty: Type },
    /// Rename of a class declaration, by reference so heritage and type
    /// lookups still see the underlying class.
    Alias { name: String, target: DeclId },
    TypeAlias { name: String, ty: Type },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Namespace { name, .. }
            | Declaration::Class { name, .. }
            | Declaration::Interface { name, .. }
            | Declaration::Enum { name }
            | Declaration::Function { name, .. }
            | Declaration::Method { name, .. }
            | Declaration::Property { name, .. }
            | Declaration::Variable { name, .. }
            | Declaration::Alias { name, .. }
            | Declaration::TypeAlias { name, .. } => name,
            Declaration::Constructor { .. } => "constructor",
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Declaration::Class { .. })
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Declaration::Interface { .. })
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self, Declaration::Namespace { .. })
    }

    /// Whether this declaration kind can stand at the top level of the
    /// output document. Members-only kinds cannot.
    pub fn is_top_level(&self) -> bool {
        !matches!(
            self,
            Declaration::Method { .. }
                | Declaration::Property { .. }
                | Declaration::Constructor { .. }
        )
    }

    /// Shallow structural copy under a new name. Member lists are copied as
    /// id lists; the members themselves are shared.
    pub fn copy_with_name(&self, new_name: &str) -> Declaration {
        let mut copy = self.clone();
        match &mut copy {
            Declaration::Namespace { name, .. }
            | Declaration::Class { name, .. }
            | Declaration::Interface { name, .. }
            | Declaration::Enum { name }
            | Declaration::Function { name, .. }
            | Declaration::Method { name, .. }
            | Declaration::Property { name, .. }
            | Declaration::Variable { name, .. }
            | Declaration::Alias { name, .. }
            | Declaration::TypeAlias { name, .. } => *name = new_name.to_string(),
            Declaration::Constructor { .. } => {}
        }
        copy
    }
}

/// Arena-based storage for the declaration tree.
#[derive(Debug, Default)]
pub struct DeclArena {
    pub decls: Vec<Declaration>,
}

impl DeclArena {
    pub fn new() -> DeclArena {
        DeclArena { decls: Vec::new() }
    }

    pub fn add(&mut self, decl: Declaration) -> DeclId {
        let index = self.decls.len() as u32;
        self.decls.push(decl);
        DeclId(index)
    }

    pub fn get(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.0 as usize]
    }

    /// Append a member to a namespace/class/interface member list.
    /// No-op for kinds without members.
    pub fn push_member(&mut self, parent: DeclId, member: DeclId) {
        match self.get_mut(parent) {
            Declaration::Namespace { members, .. }
            | Declaration::Class { members, .. }
            | Declaration::Interface { members, .. } => members.push(member),
            _ => {}
        }
    }

    /// Find a direct member by name; used to reuse namespace segments.
    pub fn find_member(&self, parent: DeclId, name: &str) -> Option<DeclId> {
        let members = match self.get(parent) {
            Declaration::Namespace { members, .. }
            | Declaration::Class { members, .. }
            | Declaration::Interface { members, .. } => members,
            _ => return None,
        };
        members.iter().copied().find(|&m| self.get(m).name() == name)
    }
}

/// Out-of-band parent/path metadata, keyed by declaration identity.
#[derive(Clone, Debug, Default)]
pub struct DeclMeta {
    pub direct_parent: Option<DeclId>,
    pub full_path: String,
}

pub type ParentMap = FxHashMap<DeclId, DeclMeta>;
