use revshare::application::service::RepaymentService;
use revshare::domain::calculator::build_repayment_instruction;
use revshare::domain::instruction::LoanReference;
use revshare::domain::payment::{BasisPoints, RevenueAmount};
use revshare::domain::ports::{LedgerClientBox, SigningCredential};
use revshare::infrastructure::in_memory::InMemoryLedger;
use std::sync::Arc;

#[tokio::test]
async fn test_ledger_as_trait_object() {
    let ledger = InMemoryLedger::new();
    let boxed: LedgerClientBox = Box::new(ledger.clone());
    let credential = SigningCredential("company-authority".to_string());

    let instruction =
        build_repayment_instruction("loan-0", RevenueAmount::new(200_000), BasisPoints::default())
            .unwrap();

    // Verify Send + Sync by spawning tasks
    let handle = tokio::spawn(async move { boxed.submit(&instruction, &credential).await });

    let tx = handle.await.unwrap().unwrap();
    assert_eq!(tx.to_string(), "tx-000001");

    let loan = LoanReference::new("loan-0").unwrap();
    assert_eq!(ledger.total_remitted(&loan).await, 50_000);
}

#[tokio::test]
async fn test_service_shared_between_tasks() {
    let ledger = InMemoryLedger::new();
    let service = Arc::new(RepaymentService::new(
        Box::new(ledger.clone()),
        BasisPoints::new(1_000).unwrap(),
    ));

    let mut handles = Vec::new();
    for loan in ["loan-a", "loan-b"] {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let credential = SigningCredential("company-authority".to_string());
            for _ in 0..10 {
                service
                    .process_revenue_payment(loan, RevenueAmount::new(1_000), &credential)
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let loan_a = LoanReference::new("loan-a").unwrap();
    let loan_b = LoanReference::new("loan-b").unwrap();
    assert_eq!(ledger.total_remitted(&loan_a).await, 1_000);
    assert_eq!(ledger.total_remitted(&loan_b).await, 1_000);
    assert_eq!(ledger.submissions().await.len(), 20);
}
