mod minting;
