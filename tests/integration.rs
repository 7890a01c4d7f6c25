use std::{cell::RefCell, rc::Rc, str::from_utf8};

use mini_bank::bin_utils::{OperationError, Service};

const TEST_FILE: &str = include_str!("operations.csv");

#[test]
fn replay_operations() {
    let mut output = Vec::new();
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    let service = Service {
        bank_name: "Banco del Estado".to_owned(),
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        error_printer: Box::new(move |line, err| sink.borrow_mut().push((line, err))),
    };
    service.run().unwrap();

    // accounts come out in registration order
    let lines: Vec<&str> = from_utf8(&output).unwrap().lines().collect();
    assert_eq!(
        lines,
        [
            "owner,balance,bank",
            "John Doe,2999.99,Banco del Estado",
            "Andres,1000.8989,Banco del Estado",
            "Maria,100.11,Banco del Estado",
        ]
    );

    let errors = errors.borrow();
    let reported: Vec<u64> = errors.iter().map(|(line, _)| *line).collect();
    assert_eq!(reported, [7, 8, 9, 10]);
    assert!(matches!(errors[0].1, OperationError::AccountErr(_)));
    assert!(matches!(errors[1].1, OperationError::MissingAmount { .. }));
    assert!(matches!(errors[2].1, OperationError::UnknownOwner { .. }));
    assert!(matches!(errors[3].1, OperationError::Parse(_)));
}

#[test]
fn replay_empty_input() {
    let mut output = Vec::new();
    let service = Service {
        bank_name: "Empty".to_owned(),
        input: "type,owner,counterparty,amount\n".as_bytes(),
        output: &mut output,
        error_printer: Box::new(|line, err| panic!("unexpected error at line {line}: {err}")),
    };
    service.run().unwrap();
    assert_eq!(from_utf8(&output).unwrap(), "owner,balance,bank\n");
}

#[test]
fn replay_survives_out_of_range_amounts() {
    let input = "\
type,owner,counterparty,amount
open,A,,79228162514264337593543950335
credit,A,,1
open,B,,1
transfer,B,A,1
open,C,,5
";
    let mut output = Vec::new();
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    let service = Service {
        bank_name: "Banco del Estado".to_owned(),
        input: input.as_bytes(),
        output: &mut output,
        error_printer: Box::new(move |line, err| sink.borrow_mut().push((line, err))),
    };
    service.run().unwrap();

    let lines: Vec<&str> = from_utf8(&output).unwrap().lines().collect();
    assert_eq!(
        lines,
        [
            "owner,balance,bank",
            "A,79228162514264337593543950335,Banco del Estado",
            "B,1,Banco del Estado",
            "C,5,Banco del Estado",
        ]
    );

    let errors = errors.borrow();
    let reported: Vec<u64> = errors.iter().map(|(line, _)| *line).collect();
    assert_eq!(reported, [3, 5]);
    assert!(
        errors
            .iter()
            .all(|(_, err)| matches!(err, OperationError::Overflow { .. }))
    );
}
