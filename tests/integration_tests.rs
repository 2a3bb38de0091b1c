use grade_curve::config::GradingScheme;
use grade_curve::grading::{Grade, assign_grade};
use grade_curve::output::export_grades_csv;
use grade_curve::roster::{load_roster, parse_roster};
use grade_curve::session::{BUMP_POINTS, GradingSession, SessionCommand};

const ROSTER: &str = "tests/fixtures/roster.csv";

#[test]
fn test_full_pipeline() {
    let scores = load_roster(ROSTER).expect("Failed to load roster");
    assert_eq!(scores.len(), 8);
    assert!(!scores.contains("Test Student"));
    assert_eq!(scores.get("John Smith"), Some(93));
    assert_eq!(scores.get("Anna Kowalski"), Some(74));

    let session = GradingSession::new(scores, GradingScheme::default());
    let evaluation = session.evaluate();

    let counts: Vec<usize> = evaluation.distribution.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 2, 2, 1, 2]);
    assert_eq!(counts.iter().sum::<usize>(), evaluation.distribution.total);

    // Sean O'Brien (79) sits just under B, Linh Nguyen (88) just under A.
    assert_eq!(evaluation.near_cutoff[&Grade::A].students, vec!["Linh Nguyen"]);
    assert_eq!(evaluation.near_cutoff[&Grade::B].students, vec!["Sean O'Brien"]);
}

#[test]
fn test_bump_then_export() {
    let scores = load_roster(ROSTER).unwrap();
    let mut session = GradingSession::new(scores, GradingScheme::default());

    session
        .apply(SessionCommand::ApplyBump("Sean O'Brien".into()))
        .unwrap();
    let evaluation = session.evaluate();
    assert_eq!(evaluation.grades["Sean O'Brien"], Grade::B);
    assert_eq!(
        evaluation.grades["Sean O'Brien"],
        assign_grade(79 + BUMP_POINTS, &evaluation.cutoffs)
    );

    let csv = export_grades_csv(&evaluation.grades).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Student,Letter Grade");
    assert_eq!(lines[1], "Anna Kowalski,C");
    assert_eq!(lines.len(), 9);
    assert!(lines.contains(&"Sean O'Brien,B"));
}

#[test]
fn test_percentage_grading() {
    let scores = load_roster(ROSTER).unwrap();
    let mut session = GradingSession::new(scores, GradingScheme::default());
    session
        .apply(SessionCommand::SetScheme(GradingScheme::percentages(25, 25, 25, 25)))
        .unwrap();

    let evaluation = session.evaluate();
    // Two students per grade out of eight.
    assert_eq!(evaluation.cutoffs.threshold(Grade::A), 88);
    assert_eq!(evaluation.cutoffs.threshold(Grade::B), 79);
    assert_eq!(evaluation.cutoffs.threshold(Grade::C), 69);
    assert_eq!(evaluation.cutoffs.threshold(Grade::D), 45);
    assert!(evaluation.distribution.bucket(Grade::F).unwrap().count == 0);
    for grade in [Grade::A, Grade::B, Grade::C, Grade::D] {
        assert_eq!(evaluation.distribution.bucket(grade).unwrap().count, 2);
    }
}

#[test]
fn test_blank_score_still_exported_as_f() {
    let csv = "Student,Final Score\n    Points Possible,100\nMuted,\n\"Roe, Ray\",\n\"Poe, Al\",91\n";
    let scores = parse_roster(csv.as_bytes()).unwrap();
    let evaluation = GradingSession::new(scores, GradingScheme::default()).evaluate();

    assert_eq!(evaluation.grades["Ray Roe"], Grade::F);
    let export = export_grades_csv(&evaluation.grades).unwrap();
    assert_eq!(export, "Student,Letter Grade\nAl Poe,A\nRay Roe,F\n");
}
