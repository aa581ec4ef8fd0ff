//! `rename <old> <new>`: column rename, stateless and phase-independent.

use unitagg_core::token::TokenType;
use unitagg_core::types::Batch;

use crate::context::ExecutorContext;
use crate::lineage::Mutation;
use crate::traits::{Directive, DirectiveError};
use crate::usage::{Arguments, UsageDefinition};

pub const NAME: &str = "rename";

#[derive(Debug, Default)]
pub struct Rename {
    /// (old_name, new_name)
    columns: Option<(String, String)>,
}

impl Rename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            columns: Some((from.into(), to.into())),
        }
    }
}

impl Directive for Rename {
    fn name(&self) -> &'static str {
        NAME
    }

    fn define(&self) -> UsageDefinition {
        UsageDefinition::builder(NAME)
            .define("old", TokenType::ColumnName)
            .define("new", TokenType::ColumnName)
            .build()
    }

    fn initialize(&mut self, args: &Arguments) -> Result<(), DirectiveError> {
        let from = args.required("old")?;
        let to = args.required("new")?;
        if from == to {
            return Err(DirectiveError::Configuration(format!(
                "rename: old and new column are both '{from}'"
            )));
        }
        self.columns = Some((from.to_string(), to.to_string()));
        Ok(())
    }

    fn execute(
        &mut self,
        mut rows: Batch,
        _ctx: &mut ExecutorContext<'_>,
    ) -> Result<Batch, DirectiveError> {
        let (from, to) = self.columns.as_ref().ok_or_else(|| {
            DirectiveError::Configuration("rename executed before initialize".into())
        })?;

        // Rows without the column pass through untouched.
        for row in &mut rows {
            row.rename(from, to);
        }
        Ok(rows)
    }

    fn lineage(&self) -> Mutation {
        match &self.columns {
            Some((from, to)) => Mutation::new(format!("Renamed column '{from}' to '{to}'"))
                .relation([from.clone()], [to.clone()]),
            None => Mutation::new("rename (unconfigured)"),
        }
    }
}
