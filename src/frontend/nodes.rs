//! Source-side declaration nodes and JSDoc type expressions.
//!
//! These are the syntax shapes the front end reports for each symbol. The
//! synthesizer never walks raw syntax; it only inspects these pre-digested
//! nodes, so every historical authoring pattern the original sources use
//! (declared classes, assignment-based statics, object-literal namespaces)
//! has a variant here.

use serde::{Deserialize, Serialize};

use super::SymbolId;

/// A declaration node attached to a symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceNode {
    /// A source file; `path` is normalized and absolute-or-root-relative,
    /// exactly as the host configured it.
    SourceFile { path: String },
    /// `class X extends ... {}`. `name` is absent for default-exported
    /// anonymous classes.
    Class {
        name: Option<String>,
        heritage: Vec<HeritageClause>,
    },
    Function {
        name: Option<String>,
        params: Vec<ParamDecl>,
        /// From a JSDoc `@returns` tag, when present.
        return_type: Option<TypeExpr>,
    },
    Constructor { params: Vec<ParamDecl> },
    Method {
        params: Vec<ParamDecl>,
        return_type: Option<TypeExpr>,
    },
    /// Class property declaration; `type_tag` from a JSDoc `@type` tag.
    Property { type_tag: Option<TypeExpr> },
    Accessor {
        accessor: AccessorKind,
        type_tag: Option<TypeExpr>,
    },
    Enum,
    /// `type X = ...` style alias declaration.
    TypeAlias { ty: TypeExpr },
    /// JSDoc `@typedef` tag; the type expression may be absent.
    Typedef { ty: Option<TypeExpr> },
    /// Assignment onto a dotted path: `Foo.bar = <value>`.
    Assignment { value: ValueExpr },
    /// Shorthand object-literal property; resolves through its value symbol.
    ShorthandProperty { value_symbol: SymbolId },
    /// A namespace body (object literal or declared namespace).
    NamespaceBody,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    Getter,
    Setter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeritageKind {
    Extends,
    Implements,
}

/// One entry of an extends/implements clause. The front end has already
/// resolved the named type to a symbol where it could; `target` is
/// `SymbolId::NONE` when resolution failed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeritageClause {
    pub keyword: HeritageKind,
    /// The type name as written, for diagnostics.
    pub written_name: String,
    pub target: SymbolId,
}

/// A declared parameter plus its JSDoc `@param` tag type, when documented.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: Option<TypeExpr>,
    /// The source parameter carried an optionality marker.
    #[serde(default)]
    pub optional: bool,
}

/// The value side of a dotted-path assignment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueExpr {
    /// Object literal: property name -> property symbol.
    ObjectLiteral { properties: Vec<(String, SymbolId)> },
    /// Any other expression; `target` is the symbol of the assigned value,
    /// `SymbolId::NONE` when the front end could not resolve one.
    Reference { target: SymbolId },
}

/// A JSDoc type expression, pre-parsed by the front end.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    Any,
    Unknown,
    Number,
    Boolean,
    String,
    Object,
    Void,
    This,
    Null,
    Undefined,
    /// Reference by written name, e.g. `Node` or `cc.Vec3`.
    Named { name: String },
    Array { element: Box<TypeExpr> },
    Union { members: Vec<TypeExpr> },
    NumberLiteral { value: f64 },
    StringLiteral { value: String },
    /// `{ a: T, b: U }` type literal.
    TypeLiteral { members: Vec<TypeLiteralMember> },
    FunctionType {
        params: Vec<FunctionTypeParam>,
        return_type: Option<Box<TypeExpr>>,
    },
    /// JSDoc `*` catch-all.
    JsDocAll,
    /// JSDoc `T=` optional form.
    JsDocOptional { inner: Box<TypeExpr> },
    /// JSDoc `?T` nullable form.
    JsDocNullable { inner: Box<TypeExpr> },
    /// JSDoc object shape documented via `@property` tags.
    JsDocTypeLiteral {
        properties: Vec<JsDocProperty>,
        /// The shape was written as an array of that object (`Object[]`).
        #[serde(default)]
        is_array: bool,
    },
    /// `import("mod").X` type reference; the front end resolved the symbol
    /// where it could.
    Import { symbol: SymbolId },
    /// A shape the front end recognized but this crate does not represent;
    /// carries the written text for diagnostics.
    Unsupported { text: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeLiteralMember {
    pub name: String,
    pub ty: Option<TypeExpr>,
}

/// A function-type parameter; `name` is absent for bare JSDoc function types
/// like `function(number): void`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionTypeParam {
    pub name: Option<String>,
    pub ty: Option<TypeExpr>,
}

/// One JSDoc `@property` tag of a documented object shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsDocProperty {
    pub name: String,
    pub ty: Option<TypeExpr>,
    /// `@property {T} [name]` marks the member optional.
    #[serde(default)]
    pub bracketed: bool,
}
