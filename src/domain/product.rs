use non_empty_string::NonEmptyString;

use crate::domain::{InvalidArgument, non_empty};

/// One classification level on the path from the product tree to a product.
///
/// The type is written verbatim (e.g. "Vendor", "Product Family").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    branch_type: NonEmptyString,
    name: NonEmptyString,
}

impl Branch {
    /// Creates a new branch.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if either value is empty.
    pub fn new(
        branch_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        Ok(Self {
            branch_type: non_empty("branch type", branch_type.into())?,
            name: non_empty("branch name", name.into())?,
        })
    }

    /// The branch type.
    #[must_use]
    pub fn branch_type(&self) -> &str {
        self.branch_type.as_str()
    }

    /// The branch name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// A product affected by, or referenced from, the advisory.
///
/// Branches are ordered from the root of the product tree down to the
/// product itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: NonEmptyString,
    id: Option<NonEmptyString>,
    branches: Vec<Branch>,
}

impl Product {
    /// Creates a product with the given full name, no id and no branches.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidArgument> {
        Ok(Self {
            name: non_empty("product name", name.into())?,
            id: None,
            branches: Vec::new(),
        })
    }

    /// Sets an explicit product id.
    ///
    /// Products without one are assigned a generated id when rendered.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the id is empty.
    pub fn with_id(mut self, id: impl Into<String>) -> Result<Self, InvalidArgument> {
        self.id = Some(non_empty("product id", id.into())?);
        Ok(self)
    }

    /// Appends a branch below any existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if either value is empty.
    pub fn with_branch(
        mut self,
        branch_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        self.branches.push(Branch::new(branch_type, name)?);
        Ok(self)
    }

    /// The full product name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The explicit product id, if one was supplied.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_ref().map(NonEmptyString::as_str)
    }

    /// The branch path, root first.
    #[must_use]
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }
}
