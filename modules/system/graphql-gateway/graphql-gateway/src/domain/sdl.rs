//! Type-system definition documents.
//!
//! Parses the part of GraphQL SDL that schema fragments and relationship
//! fragments use, and prints it back in one canonical layout so that equal
//! documents always print identically.
//!
//! Descriptions and comments are dropped. `schema { ... }` blocks and
//! `directive @x on ...` definitions are accepted and ignored: root operation
//! types are always `Query` and `Mutation`.

use std::collections::BTreeSet;
use std::fmt;

/// Root query type name.
pub const QUERY_TYPE: &str = "Query";
/// Root mutation type name.
pub const MUTATION_TYPE: &str = "Mutation";

const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

#[must_use]
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

#[must_use]
pub fn is_root_operation_type(name: &str) -> bool {
    name == QUERY_TYPE || name == MUTATION_TYPE
}

/// Parse error with the 1-based position of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Reference to a type in a field or argument position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Innermost named type, with list and non-null wrappers removed.
    #[must_use]
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// Literal value in a default value or directive argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstValue {
    Number(String),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    Variable(String),
    List(Vec<ConstValue>),
    Object(Vec<(String, ConstValue)>),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(raw) | Self::Enum(raw) => f.write_str(raw),
            Self::String(s) => write!(f, "{}", serde_json::Value::String(s.clone())),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::Variable(name) => write!(f, "${name}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, ConstValue)>,
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (i, (name, value)) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}: {value}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

fn write_directives(f: &mut fmt::Formatter<'_>, directives: &[Directive]) -> fmt::Result {
    for directive in directives {
        write!(f, " {directive}")?;
    }
    Ok(())
}

/// Argument of a field, or field of an input object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<ConstValue>,
    pub directives: Vec<Directive>,
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        write_directives(f, &self.directives)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub arguments: Vec<InputValue>,
    pub ty: TypeRef,
    pub directives: Vec<Directive>,
}

impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        write!(f, ": {}", self.ty)?;
        write_directives(f, &self.directives)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Interface,
    InputObject,
    Enum,
    Union,
    Scalar,
}

impl TypeKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Object => "type",
            Self::Interface => "interface",
            Self::InputObject => "input",
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Scalar => "scalar",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "type" => Some(Self::Object),
            "interface" => Some(Self::Interface),
            "input" => Some(Self::InputObject),
            "enum" => Some(Self::Enum),
            "union" => Some(Self::Union),
            "scalar" => Some(Self::Scalar),
            _ => None,
        }
    }
}

/// A named type definition or type extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    pub is_extension: bool,
    pub implements: Vec<String>,
    pub directives: Vec<Directive>,
    /// Object and interface fields.
    pub fields: Vec<FieldDefinition>,
    /// Input object fields.
    pub input_fields: Vec<InputValue>,
    pub enum_values: Vec<String>,
    pub union_members: Vec<String>,
}

impl TypeDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_extension: false,
            implements: Vec::new(),
            directives: Vec::new(),
            fields: Vec::new(),
            input_fields: Vec::new(),
            enum_values: Vec::new(),
            union_members: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_extension {
            f.write_str("extend ")?;
        }
        write!(f, "{} {}", self.kind.keyword(), self.name)?;
        if !self.implements.is_empty() {
            write!(f, " implements {}", self.implements.join(" & "))?;
        }
        write_directives(f, &self.directives)?;

        match self.kind {
            TypeKind::Object | TypeKind::Interface if !self.fields.is_empty() => {
                f.write_str(" {\n")?;
                for field in &self.fields {
                    writeln!(f, "  {field}")?;
                }
                f.write_str("}")
            }
            TypeKind::InputObject if !self.input_fields.is_empty() => {
                f.write_str(" {\n")?;
                for field in &self.input_fields {
                    writeln!(f, "  {field}")?;
                }
                f.write_str("}")
            }
            TypeKind::Enum if !self.enum_values.is_empty() => {
                f.write_str(" {\n")?;
                for value in &self.enum_values {
                    writeln!(f, "  {value}")?;
                }
                f.write_str("}")
            }
            TypeKind::Union if !self.union_members.is_empty() => {
                write!(f, " = {}", self.union_members.join(" | "))
            }
            _ => Ok(()),
        }
    }
}

/// Parsed type-system document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSystemDocument {
    pub definitions: Vec<TypeDefinition>,
}

impl TypeSystemDocument {
    /// # Errors
    /// Returns a `ParseError` pointing at the first token that does not fit the grammar.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Parser { tokens, pos: 0 }.parse_document()
    }

    /// First non-extension definition with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.definitions
            .iter()
            .find(|d| !d.is_extension && d.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeDefinition> {
        self.definitions
            .iter_mut()
            .find(|d| !d.is_extension && d.name == name)
    }

    /// Object type names excluding the root operation types.
    #[must_use]
    pub fn primary_type_names(&self) -> BTreeSet<String> {
        self.definitions
            .iter()
            .filter(|d| {
                d.kind == TypeKind::Object && !d.is_extension && !is_root_operation_type(&d.name)
            })
            .map(|d| d.name.clone())
            .collect()
    }

    /// Names of enums, inputs, scalars, interfaces and unions defined here.
    #[must_use]
    pub fn non_object_type_names(&self) -> BTreeSet<String> {
        self.definitions
            .iter()
            .filter(|d| d.kind != TypeKind::Object && !d.is_extension)
            .map(|d| d.name.clone())
            .collect()
    }

    /// Fields of a root operation type, including those added by `extend type`.
    pub fn root_fields<'a>(
        &'a self,
        root_type: &'a str,
    ) -> impl Iterator<Item = &'a FieldDefinition> + 'a {
        self.definitions
            .iter()
            .filter(move |d| d.kind == TypeKind::Object && d.name == root_type)
            .flat_map(|d| d.fields.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl fmt::Display for TypeSystemDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, def) in self.definitions.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{def}")?;
        }
        if !self.definitions.is_empty() {
            f.write_str("\n")?;
        }
        Ok(())
    }
}

// ===== Lexer ==================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    Punct(char),
    Str(String),
    Number(String),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "'{name}'"),
            Self::Punct(c) => write!(f, "'{c}'"),
            Self::Str(_) => f.write_str("string"),
            Self::Number(raw) => write!(f, "number {raw}"),
            Self::Eof => f.write_str("end of document"),
        }
    }
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    line: usize,
    column: usize,
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Spanned>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let Some(c) = self.peek_at(0) else {
                tokens.push(Spanned {
                    token: Token::Eof,
                    line: self.line,
                    column: self.column,
                });
                return Ok(tokens);
            };
            let (line, column) = (self.line, self.column);

            let token = match c {
                c if c.is_whitespace() || c == ',' || c == '\u{feff}' => {
                    self.bump();
                    continue;
                }
                '#' => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                    continue;
                }
                '"' => self.string()?,
                '{' | '}' | '(' | ')' | '[' | ']' | ':' | '!' | '=' | '@' | '|' | '&' | '$' => {
                    self.bump();
                    Token::Punct(c)
                }
                c if c == '_' || c.is_ascii_alphabetic() => {
                    let mut name = String::new();
                    while let Some(c) = self.peek_at(0) {
                        if c == '_' || c.is_ascii_alphanumeric() {
                            name.push(c);
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    Token::Name(name)
                }
                c if c == '-' || c.is_ascii_digit() => {
                    let mut raw = String::new();
                    while let Some(c) = self.peek_at(0) {
                        if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                            raw.push(c);
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    Token::Number(raw)
                }
                other => return Err(self.error(format!("unexpected character '{other}'"))),
            };
            tokens.push(Spanned {
                token,
                line,
                column,
            });
        }
    }

    fn string(&mut self) -> Result<Token, ParseError> {
        if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') {
            self.bump();
            self.bump();
            self.bump();
            let mut value = String::new();
            loop {
                match self.peek_at(0) {
                    None => return Err(self.error("unterminated block string")),
                    Some('"') if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') => {
                        self.bump();
                        self.bump();
                        self.bump();
                        return Ok(Token::Str(value.trim().to_owned()));
                    }
                    Some(c) => {
                        value.push(c);
                        self.bump();
                    }
                }
            }
        }

        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("unterminated string")),
                Some('"') => return Ok(Token::Str(value)),
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('u') => self.unicode_escape()?,
                        Some(c @ ('"' | '\\' | '/')) => c,
                        _ => return Err(self.error("invalid escape sequence")),
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char, ParseError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid unicode escape"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error("invalid unicode scalar"))
    }
}

// ===== Parser =================================================================

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map_or(&Token::Eof, |spanned| &spanned.token)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let (line, column) = self
            .tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or((1, 1), |s| (s.line, s.column));
        ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        self.error(format!("expected {expected}, found {}", self.peek()))
    }

    fn is_punct(&self, c: char) -> bool {
        *self.peek() == Token::Punct(c)
    }

    fn is_name(&self, keyword: &str) -> bool {
        matches!(self.peek(), Token::Name(name) if name == keyword)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.is_punct(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> Result<(), ParseError> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{c}'")))
        }
    }

    fn expect_name(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Token::Name(_) => match self.advance() {
                Token::Name(name) => Ok(name),
                _ => Err(self.unexpected("a name")),
            },
            _ => Err(self.unexpected("a name")),
        }
    }

    fn skip_description(&mut self) {
        if matches!(self.peek(), Token::Str(_)) {
            self.pos += 1;
        }
    }

    fn parse_document(mut self) -> Result<TypeSystemDocument, ParseError> {
        let mut document = TypeSystemDocument::default();
        loop {
            self.skip_description();
            if *self.peek() == Token::Eof {
                return Ok(document);
            }
            let keyword = self.expect_name()?;
            match keyword.as_str() {
                "schema" => self.skip_schema_definition()?,
                "directive" => self.skip_directive_definition()?,
                "extend" => {
                    let keyword = self.expect_name()?;
                    if keyword == "schema" {
                        self.skip_schema_definition()?;
                    } else {
                        document
                            .definitions
                            .push(self.parse_type_definition(&keyword, true)?);
                    }
                }
                _ => document
                    .definitions
                    .push(self.parse_type_definition(&keyword, false)?),
            }
        }
    }

    fn skip_schema_definition(&mut self) -> Result<(), ParseError> {
        self.parse_directives()?;
        if self.eat_punct('{') {
            while !self.eat_punct('}') {
                self.expect_name()?;
                self.expect_punct(':')?;
                self.expect_name()?;
            }
        }
        Ok(())
    }

    fn skip_directive_definition(&mut self) -> Result<(), ParseError> {
        self.expect_punct('@')?;
        self.expect_name()?;
        if self.is_punct('(') {
            self.parse_input_values('(', ')')?;
        }
        if self.is_name("repeatable") {
            self.pos += 1;
        }
        if !self.is_name("on") {
            return Err(self.unexpected("'on'"));
        }
        self.pos += 1;
        self.eat_punct('|');
        self.expect_name()?;
        while self.eat_punct('|') {
            self.expect_name()?;
        }
        Ok(())
    }

    fn parse_type_definition(
        &mut self,
        keyword: &str,
        is_extension: bool,
    ) -> Result<TypeDefinition, ParseError> {
        let kind = TypeKind::from_keyword(keyword).ok_or_else(|| {
            self.error(format!("unsupported definition '{keyword}'"))
        })?;
        let mut def = TypeDefinition::new(self.expect_name()?, kind);
        def.is_extension = is_extension;

        match kind {
            TypeKind::Object | TypeKind::Interface => {
                if self.is_name("implements") {
                    self.pos += 1;
                    self.eat_punct('&');
                    def.implements.push(self.expect_name()?);
                    while self.eat_punct('&') {
                        def.implements.push(self.expect_name()?);
                    }
                }
                def.directives = self.parse_directives()?;
                if self.eat_punct('{') {
                    while !self.eat_punct('}') {
                        def.fields.push(self.parse_field()?);
                    }
                }
            }
            TypeKind::InputObject => {
                def.directives = self.parse_directives()?;
                if self.is_punct('{') {
                    def.input_fields = self.parse_input_values('{', '}')?;
                }
            }
            TypeKind::Enum => {
                def.directives = self.parse_directives()?;
                if self.eat_punct('{') {
                    while !self.eat_punct('}') {
                        self.skip_description();
                        def.enum_values.push(self.expect_name()?);
                        self.parse_directives()?;
                    }
                }
            }
            TypeKind::Union => {
                def.directives = self.parse_directives()?;
                if self.eat_punct('=') {
                    self.eat_punct('|');
                    def.union_members.push(self.expect_name()?);
                    while self.eat_punct('|') {
                        def.union_members.push(self.expect_name()?);
                    }
                }
            }
            TypeKind::Scalar => {
                def.directives = self.parse_directives()?;
            }
        }
        Ok(def)
    }

    fn parse_field(&mut self) -> Result<FieldDefinition, ParseError> {
        self.skip_description();
        let name = self.expect_name()?;
        let arguments = if self.is_punct('(') {
            self.parse_input_values('(', ')')?
        } else {
            Vec::new()
        };
        self.expect_punct(':')?;
        let ty = self.parse_type_ref()?;
        let directives = self.parse_directives()?;
        Ok(FieldDefinition {
            name,
            arguments,
            ty,
            directives,
        })
    }

    fn parse_input_values(&mut self, open: char, close: char) -> Result<Vec<InputValue>, ParseError> {
        self.expect_punct(open)?;
        let mut values = Vec::new();
        while !self.eat_punct(close) {
            self.skip_description();
            let name = self.expect_name()?;
            self.expect_punct(':')?;
            let ty = self.parse_type_ref()?;
            let default_value = if self.eat_punct('=') {
                Some(self.parse_value()?)
            } else {
                None
            };
            let directives = self.parse_directives()?;
            values.push(InputValue {
                name,
                ty,
                default_value,
                directives,
            });
        }
        Ok(values)
    }

    fn parse_type_ref(&mut self) -> Result<TypeRef, ParseError> {
        let base = if self.eat_punct('[') {
            let inner = self.parse_type_ref()?;
            self.expect_punct(']')?;
            TypeRef::List(Box::new(inner))
        } else {
            TypeRef::Named(self.expect_name()?)
        };
        if self.eat_punct('!') {
            Ok(TypeRef::NonNull(Box::new(base)))
        } else {
            Ok(base)
        }
    }

    fn parse_directives(&mut self) -> Result<Vec<Directive>, ParseError> {
        let mut directives = Vec::new();
        while self.eat_punct('@') {
            let name = self.expect_name()?;
            let mut arguments = Vec::new();
            if self.eat_punct('(') {
                while !self.eat_punct(')') {
                    let arg = self.expect_name()?;
                    self.expect_punct(':')?;
                    arguments.push((arg, self.parse_value()?));
                }
            }
            directives.push(Directive { name, arguments });
        }
        Ok(directives)
    }

    fn parse_value(&mut self) -> Result<ConstValue, ParseError> {
        if self.eat_punct('$') {
            return Ok(ConstValue::Variable(self.expect_name()?));
        }
        if self.eat_punct('[') {
            let mut items = Vec::new();
            while !self.eat_punct(']') {
                items.push(self.parse_value()?);
            }
            return Ok(ConstValue::List(items));
        }
        if self.eat_punct('{') {
            let mut entries = Vec::new();
            while !self.eat_punct('}') {
                let key = self.expect_name()?;
                self.expect_punct(':')?;
                entries.push((key, self.parse_value()?));
            }
            return Ok(ConstValue::Object(entries));
        }
        match self.peek() {
            Token::Number(_) | Token::Str(_) | Token::Name(_) => {}
            _ => return Err(self.unexpected("a value")),
        }
        Ok(match self.advance() {
            Token::Number(raw) => ConstValue::Number(raw),
            Token::Str(s) => ConstValue::String(s),
            Token::Name(name) => match name.as_str() {
                "true" => ConstValue::Boolean(true),
                "false" => ConstValue::Boolean(false),
                "null" => ConstValue::Null,
                _ => ConstValue::Enum(name),
            },
            Token::Punct(_) | Token::Eof => ConstValue::Null,
        })
    }
}
