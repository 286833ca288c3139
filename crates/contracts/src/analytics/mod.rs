pub mod query;
pub mod response;

pub use query::{
    FilterOperator, Granularity, OrderDirection, Query, QueryFilter, QueryOrder, TimeDimension,
};
pub use response::{Annotation, CubeMeta, LoadResponse, MemberMeta, MetaResponse, ResultSet};
