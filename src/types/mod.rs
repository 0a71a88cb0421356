//! Column type descriptors
//!
//! A descriptor is a SQL data type as it would appear in a column definition,
//! optionally followed by `NULL` or `NOT NULL`:
//!
//! ```text
//! int
//! varchar(50) null
//! decimal(18, 2) not null
//! ```
//!
//! Parsing goes through sqlparser's generic dialect and is then folded into the
//! small set of kinds that type mappers care about.

use std::fmt;

use sqlparser::ast::DataType;
use sqlparser::dialect::GenericDialect;
use sqlparser::keywords::Keyword;
use sqlparser::parser::{Parser, ParserError};
use sqlparser::tokenizer::Token;

/// A parsed column type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    Bool,
    Int { bits: u8 },
    Float { mantissa: u64 },
    Decimal {
        precision: Option<u64>,
        scale: Option<u64>,
    },
    String { length: Option<u64> },
    Bytes { length: Option<u64> },
    Date,
    Time,
    Timestamp,
    Uuid,
    Json,
    /// Any type without a dedicated kind, kept as sqlparser rendered it
    Other(String),
    Nullable(Box<SqlType>),
}

impl SqlType {
    /// Parse a type descriptor
    pub fn parse(descriptor: &str) -> Result<SqlType, ParserError> {
        let dialect = GenericDialect {};
        let mut parser = Parser::new(&dialect).try_with_sql(descriptor)?;
        let data_type = parser.parse_data_type()?;

        let nullable = if parser.parse_keywords(&[Keyword::NOT, Keyword::NULL]) {
            false
        } else {
            parser.parse_keyword(Keyword::NULL)
        };

        let next = parser.peek_token();
        if next.token != Token::EOF {
            return Err(ParserError::ParserError(format!(
                "unexpected {} after type {}",
                next.token, data_type
            )));
        }

        let ty = SqlType::from_data_type(&data_type);
        Ok(if nullable {
            SqlType::Nullable(Box::new(ty))
        } else {
            ty
        })
    }

    fn from_data_type(data_type: &DataType) -> SqlType {
        match data_type {
            DataType::Boolean | DataType::Bool => SqlType::Bool,
            DataType::TinyInt { .. } => SqlType::Int { bits: 8 },
            DataType::SmallInt { .. } | DataType::Int2 { .. } => SqlType::Int { bits: 16 },
            DataType::Int { .. }
            | DataType::Integer { .. }
            | DataType::MediumInt { .. }
            | DataType::Int4 { .. } => SqlType::Int { bits: 32 },
            DataType::BigInt { .. } | DataType::Int8 { .. } => SqlType::Int { bits: 64 },
            DataType::Real | DataType::Float4 => SqlType::Float { mantissa: 24 },
            DataType::Double { .. } | DataType::DoublePrecision | DataType::Float8 => {
                SqlType::Float { mantissa: 53 }
            }
            DataType::Float { .. } => {
                let mantissa = type_args(data_type)
                    .first()
                    .copied()
                    .flatten()
                    .unwrap_or(53);
                SqlType::Float { mantissa }
            }
            DataType::Decimal { .. } | DataType::Numeric { .. } | DataType::Dec { .. } => {
                let args = type_args(data_type);
                SqlType::Decimal {
                    precision: args.first().copied().flatten(),
                    scale: args.get(1).copied().flatten(),
                }
            }
            DataType::Char { .. }
            | DataType::Character { .. }
            | DataType::Varchar { .. }
            | DataType::CharVarying { .. }
            | DataType::CharacterVarying { .. }
            | DataType::Nvarchar { .. }
            | DataType::Clob { .. }
            | DataType::Text => SqlType::String {
                length: type_args(data_type).first().copied().flatten(),
            },
            DataType::Binary { .. }
            | DataType::Varbinary { .. }
            | DataType::Blob { .. }
            | DataType::Bytea => SqlType::Bytes {
                length: type_args(data_type).first().copied().flatten(),
            },
            DataType::Date => SqlType::Date,
            DataType::Time { .. } => SqlType::Time,
            DataType::Datetime { .. } | DataType::Timestamp { .. } => SqlType::Timestamp,
            DataType::Uuid => SqlType::Uuid,
            DataType::JSON => SqlType::Json,
            other => SqlType::Other(other.to_string().to_lowercase()),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, SqlType::Nullable(_))
    }

    /// The type with any nullable wrapper removed
    pub fn base(&self) -> &SqlType {
        let mut ty = self;
        while let SqlType::Nullable(inner) = ty {
            ty = inner;
        }
        ty
    }
}

/// Numeric arguments of a parameterized type, e.g. `[Some(18), Some(2)]` for
/// `DECIMAL(18,2)`. Non-numeric arguments such as `MAX` come back as `None`.
fn type_args(data_type: &DataType) -> Vec<Option<u64>> {
    let rendered = data_type.to_string();
    let (Some(open), Some(close)) = (rendered.find('('), rendered.rfind(')')) else {
        return Vec::new();
    };
    if close <= open {
        return Vec::new();
    }
    rendered[open + 1..close]
        .split(',')
        .map(|arg| arg.trim().parse().ok())
        .collect()
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Bool => write!(f, "boolean"),
            SqlType::Int { bits } => match bits {
                0..=8 => write!(f, "tinyint"),
                9..=16 => write!(f, "smallint"),
                17..=32 => write!(f, "int"),
                _ => write!(f, "bigint"),
            },
            SqlType::Float { mantissa: 24 } => write!(f, "real"),
            SqlType::Float { mantissa: 53 } => write!(f, "double precision"),
            SqlType::Float { mantissa } => write!(f, "float({})", mantissa),
            SqlType::Decimal {
                precision: Some(p),
                scale: Some(s),
            } => write!(f, "decimal({},{})", p, s),
            SqlType::Decimal {
                precision: Some(p),
                scale: None,
            } => write!(f, "decimal({})", p),
            SqlType::Decimal { .. } => write!(f, "decimal"),
            SqlType::String { length: Some(n) } => write!(f, "varchar({})", n),
            SqlType::String { length: None } => write!(f, "text"),
            SqlType::Bytes { length: Some(n) } => write!(f, "varbinary({})", n),
            SqlType::Bytes { length: None } => write!(f, "bytea"),
            SqlType::Date => write!(f, "date"),
            SqlType::Time => write!(f, "time"),
            SqlType::Timestamp => write!(f, "timestamp"),
            SqlType::Uuid => write!(f, "uuid"),
            SqlType::Json => write!(f, "json"),
            SqlType::Other(text) => write!(f, "{}", text),
            SqlType::Nullable(inner) => write!(f, "{} null", inner),
        }
    }
}
