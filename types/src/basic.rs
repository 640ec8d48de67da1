#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    UntypedNil,
    Invalid,
}

/// The zero value family a basic type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicInfo {
    Boolean,
    Numeric,
    Textual,
    Pointer,
    Uncategorized,
}

impl BasicKind {
    /// Every kind, in declaration order
    pub const ALL: [BasicKind; 20] = [
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Complex64,
        BasicKind::Complex128,
        BasicKind::String,
        BasicKind::UnsafePointer,
        BasicKind::UntypedNil,
        BasicKind::Invalid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::UnsafePointer => "unsafe.Pointer",
            BasicKind::UntypedNil => "untyped nil",
            BasicKind::Invalid => "invalid type",
        }
    }

    /// Can this kind be named directly in a declaration file
    pub fn is_predeclared(&self) -> bool {
        !matches!(
            self,
            BasicKind::UnsafePointer | BasicKind::UntypedNil | BasicKind::Invalid
        )
    }

    pub fn info(&self) -> BasicInfo {
        match self {
            BasicKind::Bool => BasicInfo::Boolean,
            BasicKind::String => BasicInfo::Textual,
            BasicKind::UnsafePointer => BasicInfo::Pointer,
            BasicKind::UntypedNil | BasicKind::Invalid => BasicInfo::Uncategorized,
            _ => BasicInfo::Numeric,
        }
    }
}
