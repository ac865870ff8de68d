use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use super::{InterfaceDef, Kind, Shape, ShapeRef, StructDef};
use crate::{AnyValue, FieldDef, MethodDef, Signature, Visibility};

impl Shape {
    /// A named shape of any kind, e.g. a named slice type.
    pub fn named(name: impl Into<String>, module_path: impl Into<String>, kind: Kind) -> ShapeRef {
        Rc::new(Shape {
            type_identifier: Some(name.into()),
            module_path: module_path.into(),
            kind,
        })
    }

    /// Starts building a named struct declared in `module_path`.
    ///
    /// ```
    /// use reflector_core::Shape;
    ///
    /// let point = Shape::struct_builder("Point", "example.com/geo")
    ///     .field("X", Shape::i64())
    ///     .field("Y", Shape::i64())
    ///     .build();
    /// assert_eq!(point.name(), "Point");
    /// assert_eq!(point.fields().len(), 2);
    /// ```
    pub fn struct_builder(name: impl Into<String>, module_path: impl Into<String>) -> StructBuilder {
        StructBuilder {
            type_identifier: Some(name.into()),
            module_path: module_path.into(),
            def: StructDef::default(),
        }
    }

    /// Starts building an unnamed struct.
    pub fn anonymous_struct() -> StructBuilder {
        StructBuilder {
            type_identifier: None,
            module_path: String::new(),
            def: StructDef::default(),
        }
    }

    /// Starts building a named interface declared in `module_path`.
    pub fn interface_builder(
        name: impl Into<String>,
        module_path: impl Into<String>,
    ) -> InterfaceBuilder {
        InterfaceBuilder {
            type_identifier: Some(name.into()),
            module_path: module_path.into(),
            methods: Vec::new(),
        }
    }
}

/// Builder for struct shapes. See [`Shape::struct_builder`].
pub struct StructBuilder {
    type_identifier: Option<String>,
    module_path: String,
    def: StructDef,
}

impl StructBuilder {
    fn push_field(mut self, name: impl Into<String>, shape: ShapeRef, visibility: Visibility) -> Self {
        self.def.fields.push(FieldDef {
            name: name.into(),
            shape,
            visibility,
        });
        self
    }

    /// Appends an exported field.
    pub fn field(self, name: impl Into<String>, shape: ShapeRef) -> Self {
        self.push_field(name, shape, Visibility::Public)
    }

    /// Appends a module-private field.
    pub fn private_field(self, name: impl Into<String>, shape: ShapeRef) -> Self {
        self.push_field(name, shape, Visibility::Private)
    }

    fn push_method(
        mut self,
        name: impl Into<String>,
        signature: Signature,
        visibility: Visibility,
        body: impl Fn(&AnyValue, &[AnyValue]) -> Vec<AnyValue> + 'static,
    ) -> Self {
        self.def.methods.push(MethodDef {
            name: name.into(),
            signature,
            visibility,
            body: Some(Rc::new(body)),
        });
        self
    }

    /// Adds an exported method. `body` receives the receiver and arguments.
    pub fn method(
        self,
        name: impl Into<String>,
        signature: Signature,
        body: impl Fn(&AnyValue, &[AnyValue]) -> Vec<AnyValue> + 'static,
    ) -> Self {
        self.push_method(name, signature, Visibility::Public, body)
    }

    /// Adds a module-private method.
    pub fn private_method(
        self,
        name: impl Into<String>,
        signature: Signature,
        body: impl Fn(&AnyValue, &[AnyValue]) -> Vec<AnyValue> + 'static,
    ) -> Self {
        self.push_method(name, signature, Visibility::Private, body)
    }

    /// Finishes the shape. Methods are sorted by name; fields keep their
    /// declaration order.
    pub fn build(mut self) -> ShapeRef {
        self.def.methods.sort_by(|a, b| a.name.cmp(&b.name));
        Rc::new(Shape {
            type_identifier: self.type_identifier,
            module_path: self.module_path,
            kind: Kind::Struct(self.def),
        })
    }
}

/// Builder for interface shapes. See [`Shape::interface_builder`].
pub struct InterfaceBuilder {
    type_identifier: Option<String>,
    module_path: String,
    methods: Vec<MethodDef>,
}

impl InterfaceBuilder {
    /// Declares an exported method.
    pub fn method(mut self, name: impl Into<String>, signature: Signature) -> Self {
        self.methods.push(MethodDef {
            name: name.into(),
            signature,
            visibility: Visibility::Public,
            body: None,
        });
        self
    }

    /// Declares a module-private method.
    pub fn private_method(mut self, name: impl Into<String>, signature: Signature) -> Self {
        self.methods.push(MethodDef {
            name: name.into(),
            signature,
            visibility: Visibility::Private,
            body: None,
        });
        self
    }

    /// Finishes the shape, with methods sorted by name.
    pub fn build(mut self) -> ShapeRef {
        self.methods.sort_by(|a, b| a.name.cmp(&b.name));
        Rc::new(Shape {
            type_identifier: self.type_identifier,
            module_path: self.module_path,
            kind: Kind::Interface(InterfaceDef {
                methods: self.methods,
            }),
        })
    }
}
