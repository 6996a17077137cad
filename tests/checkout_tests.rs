use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;

#[test]
fn test_checkout_flow_clears_cart() {
    let file = common::script(&[
        "add,2,",
        "qty,1,2",
        "cep,01001-000,",
        "lookup,,",
        "address,number,100",
        "address,reference,Portão azul",
        "coupon,DEZ,",
        "checkout,,",
    ]);

    common::storefront()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Address filled from postal code"))
        .stderr(predicate::str::contains("Order 1 placed"))
        .stdout(predicate::str::contains("line:").not())
        .stdout(predicate::str::contains("subtotal,,,0.00"));
}

#[test]
fn test_checkout_rejected_for_empty_cart() {
    let file = common::script(&["checkout,,"]);

    common::storefront()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Cart is empty"));
}

#[test]
fn test_checkout_rejected_for_incomplete_address() {
    let file = common::script(&["add,1,", "checkout,,"]);

    common::storefront()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Shipping address incomplete: missing street, number, city, state",
        ))
        .stdout(predicate::str::contains("line:1"));
}

#[test]
fn test_checkout_rejected_without_postal_lookup() {
    let file = common::script(&[
        "add,1,",
        "cep,80010000,",
        "address,street,Rua XV de Novembro",
        "address,number,10",
        "address,city,Curitiba",
        "address,state,PR",
        "checkout,,",
    ]);

    common::storefront()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Postal code not validated"))
        .stdout(predicate::str::contains("line:1"));
}

#[test]
fn test_out_of_stock_product() {
    // Both sizes of product 3 drop to zero.
    let file = common::script(&["stock,6,0", "stock,7,0", "add,3,"]);

    common::storefront()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Product out of stock"))
        .stdout(predicate::str::contains("line:").not());
}

#[test]
fn test_malformed_rows_are_skipped() {
    let file = common::script(&["fly,1,", "add,abc,", "qty,1,", "add,1,"]);

    common::storefront()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Error reading action"))
        .stdout(predicate::str::contains("line:1,Camiseta Básica (Tamanho - P),1,49.90"));
}
