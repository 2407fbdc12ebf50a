//! Fitted regression models.

use serde::Deserialize;

/// A fitted point-prediction regressor over a fixed-width feature vector.
pub trait Regressor {
    /// Number of input features the model was trained with.
    fn feature_count(&self) -> usize;

    /// Returns a single prediction for one scaled row.
    fn predict(&self, row: &[f64]) -> f64;

    /// Returns a human-readable type name for the model.
    fn model_type(&self) -> &'static str;

    /// Checks the model's internal structure against its declared feature count.
    ///
    /// Returns a list of problems; empty when the model is usable.
    fn structural_errors(&self) -> Vec<String>;
}

/// One node of a regression tree.
///
/// Split nodes route `row[split] < threshold` to `yes`, everything else to
/// `no`, and non-finite values to `missing`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum TreeNode {
    Split {
        split: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        #[serde(default)]
        missing: Option<usize>,
    },
    Leaf {
        leaf: f64,
    },
}

/// A single regression tree. Node 0 is the root.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walks from the root to a leaf and returns its value.
    ///
    /// Assumes the tree passed [`TreeEnsemble::structural_errors`]; a walk
    /// that leaves the node table or loops returns `NaN`.
    pub fn eval(&self, row: &[f64]) -> f64 {
        let mut idx = 0usize;
        // a well-formed tree reaches a leaf in fewer hops than it has nodes
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { leaf }) => return *leaf,
                Some(TreeNode::Split {
                    split,
                    threshold,
                    yes,
                    no,
                    missing,
                }) => {
                    let x = row.get(*split).copied().unwrap_or(f64::NAN);
                    idx = if !x.is_finite() {
                        missing.unwrap_or(*yes)
                    } else if x < *threshold {
                        *yes
                    } else {
                        *no
                    };
                }
                None => return f64::NAN,
            }
        }
        f64::NAN
    }

    fn errors(&self, tree_idx: usize, feature_count: usize) -> Vec<String> {
        let mut errors = Vec::new();
        if self.nodes.is_empty() {
            errors.push(format!("trees[{tree_idx}] has no nodes"));
        }
        let n = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                split,
                yes,
                no,
                missing,
                ..
            } = node
            {
                if *split >= feature_count {
                    errors.push(format!(
                        "trees[{tree_idx}].nodes[{i}] splits on feature {split}, \
                         model has {feature_count}"
                    ));
                }
                for child in [Some(*yes), Some(*no), *missing].into_iter().flatten() {
                    if child >= n || child <= i {
                        errors.push(format!(
                            "trees[{tree_idx}].nodes[{i}] points to invalid child {child}"
                        ));
                    }
                }
            }
        }
        errors
    }
}

/// Gradient-boosted trees: `base_score` plus one leaf from every tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeEnsemble {
    pub num_features: usize,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl Regressor for TreeEnsemble {
    fn feature_count(&self) -> usize {
        self.num_features
    }

    fn predict(&self, row: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.eval(row)).sum::<f64>()
    }

    fn model_type(&self) -> &'static str {
        "tree_ensemble"
    }

    fn structural_errors(&self) -> Vec<String> {
        self.trees
            .iter()
            .enumerate()
            .flat_map(|(i, t)| t.errors(i, self.num_features))
            .collect()
    }
}

/// Ordinary linear model: `intercept + coefficients · row`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl Regressor for LinearModel {
    fn feature_count(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    fn model_type(&self) -> &'static str {
        "linear"
    }

    fn structural_errors(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Model artifact, dispatched on the JSON `kind` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    TreeEnsemble(TreeEnsemble),
    Linear(LinearModel),
}

impl Model {
    fn inner(&self) -> &dyn Regressor {
        match self {
            Self::TreeEnsemble(m) => m,
            Self::Linear(m) => m,
        }
    }

    /// Short size description for logging: tree or coefficient count.
    pub fn summary(&self) -> String {
        match self {
            Self::TreeEnsemble(m) => format!("{} trees", m.trees.len()),
            Self::Linear(m) => format!("{} coefficients", m.coefficients.len()),
        }
    }
}

impl Regressor for Model {
    fn feature_count(&self) -> usize {
        self.inner().feature_count()
    }

    fn predict(&self, row: &[f64]) -> f64 {
        self.inner().predict(row)
    }

    fn model_type(&self) -> &'static str {
        self.inner().model_type()
    }

    fn structural_errors(&self) -> Vec<String> {
        self.inner().structural_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(split: usize, threshold: f64, yes: f64, no: f64) -> Tree {
        Tree {
            nodes: vec![
                TreeNode::Split {
                    split,
                    threshold,
                    yes: 1,
                    no: 2,
                    missing: None,
                },
                TreeNode::Leaf { leaf: yes },
                TreeNode::Leaf { leaf: no },
            ],
        }
    }

    #[test]
    fn stump_routes_on_threshold() {
        let t = stump(0, 1.0, -1.0, 1.0);
        assert_eq!(t.eval(&[0.5]), -1.0);
        assert_eq!(t.eval(&[1.0]), 1.0);
        assert_eq!(t.eval(&[3.0]), 1.0);
    }

    #[test]
    fn non_finite_goes_to_missing_branch() {
        let mut t = stump(0, 1.0, -1.0, 1.0);
        assert_eq!(t.eval(&[f64::NAN]), -1.0);
        if let TreeNode::Split { missing, .. } = &mut t.nodes[0] {
            *missing = Some(2);
        }
        assert_eq!(t.eval(&[f64::NAN]), 1.0);
    }

    #[test]
    fn ensemble_sums_trees_and_base_score() {
        let m = TreeEnsemble {
            num_features: 2,
            base_score: 0.5,
            trees: vec![stump(0, 0.0, 1.0, 2.0), stump(1, 0.0, 10.0, 20.0)],
        };
        assert_eq!(m.predict(&[-1.0, 1.0]), 21.5);
        assert!(m.structural_errors().is_empty());
    }

    #[test]
    fn structural_check_flags_bad_split_and_child() {
        let mut t = stump(3, 0.0, 1.0, 2.0);
        if let TreeNode::Split { no, .. } = &mut t.nodes[0] {
            *no = 9;
        }
        let m = TreeEnsemble {
            num_features: 2,
            base_score: 0.0,
            trees: vec![t],
        };
        let errors = m.structural_errors();
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors[0].contains("splits on feature 3"));
        assert!(errors[1].contains("invalid child 9"));
    }

    #[test]
    fn structural_check_flags_back_edge() {
        let t = Tree {
            nodes: vec![
                TreeNode::Split {
                    split: 0,
                    threshold: 0.0,
                    yes: 1,
                    no: 0,
                    missing: None,
                },
                TreeNode::Leaf { leaf: 1.0 },
            ],
        };
        assert_eq!(t.errors(0, 1).len(), 1);
        // looping walk does not hang
        assert!(t.eval(&[5.0]).is_nan());
    }

    #[test]
    fn linear_is_dot_product_plus_intercept() {
        let m = LinearModel {
            intercept: 1.0,
            coefficients: vec![2.0, -1.0],
        };
        assert_eq!(m.predict(&[3.0, 4.0]), 3.0);
        assert_eq!(m.feature_count(), 2);
    }

    #[test]
    fn parses_xgboost_style_json() {
        let json = r#"{
            "kind": "tree_ensemble",
            "num_features": 1,
            "base_score": 0.25,
            "trees": [
                {"nodes": [
                    {"split": 0, "threshold": 0.5, "yes": 1, "no": 2, "missing": 2},
                    {"leaf": 1.0},
                    {"leaf": 2.0}
                ]}
            ]
        }"#;
        let m: Model = serde_json::from_str(json).expect("ensemble JSON should parse");
        assert_eq!(m.predict(&[0.0]), 1.25);
        assert_eq!(m.summary(), "1 trees");
    }
}
