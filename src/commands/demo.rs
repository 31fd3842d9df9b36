//! A guided tour of the `mlmath` helpers.

use anyhow::Result;
use mlmath::{
    are_orthogonal, bayes_theorem, conditional_probability, dot_product, identity_matrix,
    joint_probability, marginal_probability, matrix_add, matrix_multiply, matrix_subtract,
    matrix_transpose, vector_add, vector_magnitude, vector_normalize, vector_subtract,
    Conditional, Dependence, EventData, Matrix, SpamCounts,
};
use neuron::sigmoid;

fn banner(title: &str) {
    let rule = "=".repeat(50);
    println!("{rule}\n{title}\n{rule}");
}

fn rounded(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.3}")).collect();
    format!("[{}]", parts.join(", "))
}

fn print_matrix(label: &str, m: &Matrix) {
    println!("{label}:");
    for line in m.to_string().lines() {
        println!("  {line}");
    }
}

pub fn handle_demo() -> Result<()> {
    demo_vectors()?;
    demo_matrices()?;
    demo_probability()?;
    demo_forward_pass()?;
    Ok(())
}

fn demo_vectors() -> Result<()> {
    banner("VECTOR OPERATIONS DEMO");
    let a = [1.0, 2.0, 3.0];
    let b = [4.0, 5.0, 6.0];
    println!("Vector A: {a:?}");
    println!("Vector B: {b:?}\n");

    println!("Dot Product (A · B): {}", dot_product(&a, &b)?);
    println!("Vector Addition (A + B): {:?}", vector_add(&a, &b)?);
    println!("Vector Subtraction (B - A): {:?}", vector_subtract(&b, &a)?);
    println!("Magnitude of A: {:.3}", vector_magnitude(&a)?);
    println!("Magnitude of B: {:.3}", vector_magnitude(&b)?);
    println!("Normalized A: {}", rounded(&vector_normalize(&a)?));
    println!("Normalized B: {}", rounded(&vector_normalize(&b)?));

    let (x, y) = ([1.0, 0.0], [0.0, 1.0]);
    println!(
        "\nOrthogonal vectors {x:?} · {y:?} = {} (orthogonal: {})\n",
        dot_product(&x, &y)?,
        are_orthogonal(&x, &y)?
    );
    Ok(())
}

fn demo_matrices() -> Result<()> {
    banner("MATRIX OPERATIONS DEMO");
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
    let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]])?;

    print_matrix("Matrix A", &a);
    print_matrix("\nMatrix B", &b);
    print_matrix("\nMatrix Multiplication (A × B)", &matrix_multiply(&a, &b)?);
    print_matrix("\nMatrix Addition (A + B)", &matrix_add(&a, &b)?);
    print_matrix("\nMatrix Subtraction (B - A)", &matrix_subtract(&b, &a)?);
    print_matrix("\nTranspose of A", &matrix_transpose(&a));
    print_matrix("\n3×3 Identity Matrix", &identity_matrix(3)?);
    println!();
    Ok(())
}

fn demo_probability() -> Result<()> {
    banner("PROBABILITY OPERATIONS DEMO");

    println!("Example 1: Email Spam Detection");
    println!("{}", "-".repeat(32));
    let counts = SpamCounts {
        total: 1000,
        contains_free: 300,
        spam: 400,
        spam_and_free: 120,
    };
    println!("Dataset: {} emails", counts.total);
    println!("- {} contain 'free'", counts.contains_free);
    println!("- {} are spam", counts.spam);
    println!("- {} are spam AND contain 'free'\n", counts.spam_and_free);
    if let Conditional::Spam(p) = conditional_probability(&EventData::Spam(counts))? {
        println!("Calculated Probabilities:");
        println!("- P(Spam): {:.3}", p.p_spam);
        println!("- P(Free): {:.3}", p.p_free);
        println!("- P(Free | Spam): {:.3}", p.p_free_given_spam);
        println!("- P(Spam | Free): {:.3}\n", p.p_spam_given_free);
    }

    println!("Example 2: Bayes' Theorem");
    println!("{}", "-".repeat(26));
    let (prior, likelihood, evidence) = (0.01, 0.95, 0.05);
    println!("Medical Test Scenario:");
    println!("- Prior P(Disease): {prior}");
    println!("- Likelihood P(Test+ | Disease): {likelihood}");
    println!("- Evidence P(Test+): {evidence}");
    println!(
        "- Posterior P(Disease | Test+): {:.3}\n",
        bayes_theorem(prior, likelihood, evidence)?
    );

    println!("Example 3: Joint Probability");
    println!("{}", "-".repeat(28));
    let (rain, cold, cold_given_rain) = (0.3, 0.4, 0.6);
    println!("P(Rain): {rain}");
    println!("P(Cold): {cold}");
    println!(
        "P(Rain AND Cold) [independent]: {:.3}",
        joint_probability(rain, cold, Dependence::Independent)?
    );
    println!(
        "P(Rain AND Cold) [dependent]: {:.3}\n",
        joint_probability(rain, cold_given_rain, Dependence::Dependent)?
    );

    println!("Example 4: Marginal Probability");
    println!("{}", "-".repeat(31));
    let joint = [0.15, 0.25, 0.10];
    println!("Joint probabilities: {joint:?}");
    println!("Marginal probability: {:.3}\n", marginal_probability(&joint)?);
    Ok(())
}

fn demo_forward_pass() -> Result<()> {
    banner("REAL-WORLD ML EXAMPLE");
    println!("Scenario: Simple Neural Network Forward Pass");
    println!("{}", "-".repeat(42));

    let features = [0.5, 0.8, 0.2];
    println!("Input features: {features:?}");

    let input_to_hidden = Matrix::from_rows(vec![vec![0.2, 0.4, 0.1], vec![0.3, 0.1, 0.5]])?;
    println!("Weights (Input → Hidden):");
    for i in 0..input_to_hidden.rows() {
        println!("  Hidden neuron {}: {:?}", i + 1, input_to_hidden.row(i));
    }

    let hidden = (0..input_to_hidden.rows())
        .map(|i| dot_product(&features, input_to_hidden.row(i)))
        .collect::<mlmath::Result<Vec<f64>>>()?;
    println!("\nHidden layer activations: {}", rounded(&hidden));

    let hidden_to_output = Matrix::from_rows(vec![vec![0.6, 0.9]])?;
    let column = Matrix::from_rows(hidden.iter().map(|h| vec![*h]).collect())?;
    let output = matrix_multiply(&hidden_to_output, &column)?[(0, 0)];
    println!("Weights (Hidden → Output): {:?}", hidden_to_output.row(0));
    println!("Final output: {output:.3}");
    println!("After sigmoid: {:.3}\n", sigmoid(output));

    println!("Feature Engineering Example:");
    println!("{}", "-".repeat(28));
    println!("Original features: {features:?}");
    println!("Feature magnitude: {:.3}", vector_magnitude(&features)?);
    println!("Normalized features: {}", rounded(&vector_normalize(&features)?));

    let extra = [0.1, 0.9, 0.4];
    println!("Additional features: {extra:?}");
    println!("Combined features: {}\n", rounded(&vector_add(&features, &extra)?));
    Ok(())
}
